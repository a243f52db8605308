//! Command-line interface for the benchmark battery.

use crate::config::RunConfig;
use crate::fixtures::DEFAULT_DATA_DIR;
use crate::workloads::{DEFAULT_NUM_DOCS, WorkloadConfig};
use anyhow::Result;
use clap::Parser;
use docperf_core::{NUM_ITERATIONS, TestFilter};
use std::path::PathBuf;

/// Latency benchmarks for document codecs and a document store driver.
///
/// Prints one line per executed test: the name right-justified to 25
/// columns, a comma, and the median task latency in milliseconds.
#[derive(Parser, Debug)]
#[command(name = "docperf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Tests to run. Runs every test when omitted.
    ///
    /// Names must match exactly; unknown names are ignored.
    #[arg(value_name = "TEST")]
    pub tests: Vec<String>,

    /// Directory containing the JSON fixtures.
    #[arg(long, env = "DOCPERF_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Timed iterations per test.
    #[arg(long, default_value_t = NUM_ITERATIONS)]
    pub iterations: usize,

    /// Operations performed by each timed task.
    #[arg(long, default_value_t = DEFAULT_NUM_DOCS)]
    pub num_docs: usize,

    /// Also write results to a JSON file.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// List registered test names and exit.
    #[arg(long)]
    pub list: bool,

    /// Verbose diagnostics on stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert parsed arguments into a validated run configuration.
    pub fn into_config(self) -> Result<RunConfig> {
        let config = RunConfig {
            iterations: self.iterations,
            filter: TestFilter::new(self.tests),
            workload: WorkloadConfig::new(self.data_dir, self.num_docs),
            json_output: self.json,
        };
        config.validate()?;
        Ok(config)
    }
}
