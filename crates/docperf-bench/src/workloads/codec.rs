//! Document encode/decode workloads.
//!
//! Each loads a fixture once in `setup` and then converts it `num_docs`
//! times per task: encoding serializes the in-memory document, decoding
//! parses the serialized bytes back into a document.

use crate::fixtures::read_json_file;
use crate::workloads::WorkloadConfig;
use anyhow::{Context as _, Result};
use docperf_core::{Context, PerfTest};
use serde_json::Value;
use std::hint::black_box;

/// Fixture document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// Many top-level scalar fields.
    Flat,
    /// Deeply nested subdocuments.
    Deep,
    /// Every value type the format supports.
    Full,
}

impl DocumentShape {
    pub const ALL: [Self; 3] = [Self::Flat, Self::Deep, Self::Full];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Deep => "deep",
            Self::Full => "full",
        }
    }

    pub fn fixture(&self) -> &'static str {
        match self {
            Self::Flat => "flat_bson.json",
            Self::Deep => "deep_bson.json",
            Self::Full => "full_bson.json",
        }
    }
}

/// Serialize a fixture document `num_docs` times per task.
pub struct EncodeWorkload {
    name: String,
    shape: DocumentShape,
    config: WorkloadConfig,
}

impl EncodeWorkload {
    pub fn new(shape: DocumentShape, config: WorkloadConfig) -> Self {
        Self {
            name: format!("{}-encode", shape.name()),
            shape,
            config,
        }
    }
}

impl PerfTest for EncodeWorkload {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        let doc = read_json_file(&self.config.data_dir, self.shape.fixture())?;
        ctx.insert(doc);
        Ok(())
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        let doc = ctx.state::<Value>()?;
        for _ in 0..self.config.num_docs {
            let bytes = serde_json::to_vec(doc).context("Failed to encode document")?;
            black_box(bytes);
        }
        Ok(())
    }
}

/// Parse a serialized fixture `num_docs` times per task.
pub struct DecodeWorkload {
    name: String,
    shape: DocumentShape,
    config: WorkloadConfig,
}

impl DecodeWorkload {
    pub fn new(shape: DocumentShape, config: WorkloadConfig) -> Self {
        Self {
            name: format!("{}-decode", shape.name()),
            shape,
            config,
        }
    }
}

impl PerfTest for DecodeWorkload {
    fn name(&self) -> &str {
        &self.name
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        let doc = read_json_file(&self.config.data_dir, self.shape.fixture())?;
        let bytes = serde_json::to_vec(&doc).context("Failed to encode fixture")?;
        ctx.insert(bytes);
        Ok(())
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        let bytes = ctx.state::<Vec<u8>>()?;
        for _ in 0..self.config.num_docs {
            let doc: Value =
                serde_json::from_slice(bytes).context("Failed to decode document")?;
            black_box(doc);
        }
        Ok(())
    }
}
