//! Configuration types for a benchmark run.

use crate::workloads::WorkloadConfig;
use docperf_core::TestFilter;
use std::path::PathBuf;
use thiserror::Error;

/// Invalid run settings, rejected before any test executes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Iteration count must be at least 1")]
    ZeroIterations,

    #[error("Document count must be at least 1")]
    ZeroDocuments,
}

/// Complete settings for one invocation.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Timed iterations per test.
    pub iterations: usize,
    /// Tests to run; empty means all.
    pub filter: TestFilter,
    /// Fixture location and per-task operation count.
    pub workload: WorkloadConfig,
    /// Where to write the JSON report, if anywhere.
    pub json_output: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: docperf_core::NUM_ITERATIONS,
            filter: TestFilter::all(),
            workload: WorkloadConfig::default(),
            json_output: None,
        }
    }
}

impl RunConfig {
    /// Check the settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.workload.num_docs == 0 {
            return Err(ConfigError::ZeroDocuments);
        }
        Ok(())
    }
}
