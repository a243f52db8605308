//! Registered benchmark workloads.
//!
//! Two families, registered in this order:
//!
//! **Codec:** flat-encode, deep-encode, full-encode, flat-decode,
//! deep-decode, full-decode
//!
//! **Driver:** run-command, find-one-by-id, small-doc-insert-one,
//! large-doc-insert-one, find-many-and-empty-cursor, small-doc-bulk-insert,
//! large-doc-bulk-insert

mod codec;
mod driver;

pub use codec::{DecodeWorkload, DocumentShape, EncodeWorkload};
pub use driver::{
    BulkInsertWorkload, DocumentSize, FindManyWorkload, FindOneByIdWorkload, InsertOneWorkload,
    RunCommandWorkload,
};

use crate::fixtures::DEFAULT_DATA_DIR;
use docperf_core::PerfTest;
use std::path::PathBuf;

/// Operations per task for the full-size battery.
pub const DEFAULT_NUM_DOCS: usize = 10_000;

/// Fixture holding the document used by the lookup and scan workloads.
pub const TWEET_FIXTURE: &str = "tweet.json";

/// Settings shared by every workload.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Directory fixtures are read from.
    pub data_dir: PathBuf,
    /// Operations performed by one task invocation.
    pub num_docs: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            num_docs: DEFAULT_NUM_DOCS,
        }
    }
}

impl WorkloadConfig {
    pub fn new(data_dir: impl Into<PathBuf>, num_docs: usize) -> Self {
        Self {
            data_dir: data_dir.into(),
            num_docs,
        }
    }

    /// Number of large documents per task, scaled down from `num_docs`.
    pub fn large_doc_count(&self) -> usize {
        (self.num_docs / 1000).max(1)
    }
}

/// Names of every registered workload, in execution order.
///
/// Constructing a workload reads no fixtures, so this works without a data
/// directory.
pub fn workload_names() -> Vec<String> {
    create_workloads(&WorkloadConfig::default())
        .iter()
        .map(|w| w.name().to_owned())
        .collect()
}

/// Build the full battery in registration order.
pub fn create_workloads(config: &WorkloadConfig) -> Vec<Box<dyn PerfTest>> {
    let mut workloads: Vec<Box<dyn PerfTest>> = Vec::new();

    for shape in DocumentShape::ALL {
        workloads.push(Box::new(EncodeWorkload::new(shape, config.clone())));
    }
    for shape in DocumentShape::ALL {
        workloads.push(Box::new(DecodeWorkload::new(shape, config.clone())));
    }

    workloads.push(Box::new(RunCommandWorkload::new(config.clone())));
    workloads.push(Box::new(FindOneByIdWorkload::new(config.clone())));
    workloads.push(Box::new(InsertOneWorkload::new(DocumentSize::Small, config.clone())));
    workloads.push(Box::new(InsertOneWorkload::new(DocumentSize::Large, config.clone())));
    workloads.push(Box::new(FindManyWorkload::new(config.clone())));
    workloads.push(Box::new(BulkInsertWorkload::new(DocumentSize::Small, config.clone())));
    workloads.push(Box::new(BulkInsertWorkload::new(DocumentSize::Large, config.clone())));

    workloads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        assert_eq!(
            workload_names(),
            [
                "flat-encode",
                "deep-encode",
                "full-encode",
                "flat-decode",
                "deep-decode",
                "full-decode",
                "run-command",
                "find-one-by-id",
                "small-doc-insert-one",
                "large-doc-insert-one",
                "find-many-and-empty-cursor",
                "small-doc-bulk-insert",
                "large-doc-bulk-insert",
            ]
        );
    }

    #[test]
    fn test_large_doc_count_scaling() {
        assert_eq!(WorkloadConfig::default().large_doc_count(), 10);
        assert_eq!(WorkloadConfig::new(".", 50).large_doc_count(), 1);
    }
}
