//! Latency benchmark battery for document codecs and a document store driver.
//!
//! Registers the codec and driver workloads as [`docperf_core::PerfTest`]s
//! and runs them through [`docperf_core::Runner`].
//!
//! # Usage
//!
//! ```text
//! docperf [OPTIONS] [TEST]...
//!
//! Arguments:
//!   [TEST]...              Tests to run (default: all)
//!
//! Options:
//!       --data-dir <DIR>    Fixture directory (default: performance-testdata)
//!       --iterations <N>    Timed iterations per test (default: 100)
//!       --num-docs <N>      Operations per task (default: 10000)
//!       --json <PATH>       Also write results as JSON
//!       --list              List test names and exit
//!   -v, --verbose           Verbose output
//! ```

pub mod cli;
pub mod config;
pub mod fixtures;
pub mod report;
pub mod store;
pub mod workloads;

pub use cli::Cli;
pub use config::{ConfigError, RunConfig};
pub use fixtures::{FixtureError, read_json_file};
pub use store::{DocumentStore, StoreError};
pub use workloads::{WorkloadConfig, create_workloads, workload_names};
