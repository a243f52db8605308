//! Workloads that drive the document store.
//!
//! Every workload opens its own in-memory store in `setup`, so no state
//! survives from one test to the next. Insert workloads empty the collection
//! in `before`, keeping that cost out of the timed window.

// Document ids are SQLite rowids; counts are far below i64::MAX.
#![allow(clippy::cast_possible_wrap)]

use crate::fixtures::read_json_file;
use crate::store::DocumentStore;
use crate::workloads::{TWEET_FIXTURE, WorkloadConfig};
use anyhow::{Context as _, Result, anyhow, ensure};
use docperf_core::{Context, PerfTest};
use serde_json::Value;
use std::hint::black_box;
use std::iter;

/// Size class of the inserted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSize {
    Small,
    Large,
}

impl DocumentSize {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }

    pub fn fixture(&self) -> &'static str {
        match self {
            Self::Small => "small_doc.json",
            Self::Large => "large_doc.json",
        }
    }

    /// Documents inserted per task.
    pub fn count(&self, config: &WorkloadConfig) -> usize {
        match self {
            Self::Small => config.num_docs,
            Self::Large => config.large_doc_count(),
        }
    }
}

/// Store plus the document a workload inserts.
struct InsertState {
    store: DocumentStore,
    doc: Value,
}

fn open_store() -> Result<DocumentStore> {
    DocumentStore::open_in_memory().context("Failed to open document store")
}

/// Open a store holding `count` copies of the tweet fixture, ids `1..=count`.
fn seeded_store(config: &WorkloadConfig, count: usize) -> Result<DocumentStore> {
    let tweet = read_json_file(&config.data_dir, TWEET_FIXTURE)?;
    let mut store = open_store()?;
    store
        .insert_many(iter::repeat_n(&tweet, count))
        .context("Failed to seed collection")?;
    Ok(store)
}

/// Round-trip a trivial command `num_docs` times.
pub struct RunCommandWorkload {
    config: WorkloadConfig,
}

impl RunCommandWorkload {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }
}

impl PerfTest for RunCommandWorkload {
    fn name(&self) -> &'static str {
        "run-command"
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        ctx.insert(open_store()?);
        Ok(())
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        let store = ctx.state::<DocumentStore>()?;
        for _ in 0..self.config.num_docs {
            store.ping()?;
        }
        Ok(())
    }
}

/// Look up every seeded document by id.
pub struct FindOneByIdWorkload {
    config: WorkloadConfig,
}

impl FindOneByIdWorkload {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }
}

impl PerfTest for FindOneByIdWorkload {
    fn name(&self) -> &'static str {
        "find-one-by-id"
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        ctx.insert(seeded_store(&self.config, self.config.num_docs)?);
        Ok(())
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        let store = ctx.state::<DocumentStore>()?;
        for id in 1..=self.config.num_docs as i64 {
            let doc = store
                .find_by_id(id)?
                .ok_or_else(|| anyhow!("Document {id} not found"))?;
            black_box(doc);
        }
        Ok(())
    }
}

/// Insert documents one at a time.
pub struct InsertOneWorkload {
    name: String,
    size: DocumentSize,
    config: WorkloadConfig,
}

impl InsertOneWorkload {
    pub fn new(size: DocumentSize, config: WorkloadConfig) -> Self {
        Self {
            name: format!("{}-doc-insert-one", size.name()),
            size,
            config,
        }
    }
}

impl PerfTest for InsertOneWorkload {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        let doc = read_json_file(&self.config.data_dir, self.size.fixture())?;
        ctx.insert(InsertState {
            store: open_store()?,
            doc,
        });
        Ok(())
    }

    fn before(&self, ctx: &mut Context) -> Result<()> {
        ctx.state::<InsertState>()?.store.reset()?;
        Ok(())
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        let state = ctx.state::<InsertState>()?;
        for _ in 0..self.size.count(&self.config) {
            state.store.insert_one(&state.doc)?;
        }
        Ok(())
    }
}

/// Insert documents in one transaction.
pub struct BulkInsertWorkload {
    name: String,
    size: DocumentSize,
    config: WorkloadConfig,
}

impl BulkInsertWorkload {
    pub fn new(size: DocumentSize, config: WorkloadConfig) -> Self {
        Self {
            name: format!("{}-doc-bulk-insert", size.name()),
            size,
            config,
        }
    }
}

impl PerfTest for BulkInsertWorkload {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        let doc = read_json_file(&self.config.data_dir, self.size.fixture())?;
        ctx.insert(InsertState {
            store: open_store()?,
            doc,
        });
        Ok(())
    }

    fn before(&self, ctx: &mut Context) -> Result<()> {
        ctx.state::<InsertState>()?.store.reset()?;
        Ok(())
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        let count = self.size.count(&self.config);
        let InsertState { store, doc } = ctx.state_mut::<InsertState>()?;
        let inserted = store.insert_many(iter::repeat_n(&*doc, count))?;
        ensure!(inserted == count, "Inserted {inserted} of {count} documents");
        Ok(())
    }
}

/// Scan and decode the whole collection.
pub struct FindManyWorkload {
    config: WorkloadConfig,
}

impl FindManyWorkload {
    pub fn new(config: WorkloadConfig) -> Self {
        Self { config }
    }
}

impl PerfTest for FindManyWorkload {
    fn name(&self) -> &'static str {
        "find-many-and-empty-cursor"
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        ctx.insert(seeded_store(&self.config, self.config.num_docs)?);
        Ok(())
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        let store = ctx.state::<DocumentStore>()?;
        let visited = store.for_each_document(|doc| {
            black_box(doc);
        })?;
        ensure!(
            visited == self.config.num_docs,
            "Cursor returned {visited} of {} documents",
            self.config.num_docs
        );
        Ok(())
    }
}
