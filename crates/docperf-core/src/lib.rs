//! Timed-iteration engine for document driver latency benchmarks.
//!
//! A benchmark is a named [`PerfTest`] with up to five lifecycle hooks. The
//! [`Runner`] executes each selected test a fixed number of times, times only
//! the `task` hook, and reports the lower-middle median of the samples in
//! milliseconds:
//!
//! ```text
//!        parse-small-doc, 0.042000
//! ```
//!
//! # Lifecycle
//!
//! ```text
//! setup, [before, task, after] x iterations, teardown
//! ```
//!
//! `setup`/`teardown` amortize one-time cost (connections, fixtures) across
//! the run, `before`/`after` keep per-iteration preparation out of the timed
//! window.

pub mod context;
pub mod filter;
pub mod runner;
pub mod stats;
pub mod test_case;
pub mod timer;

pub use context::{Context, ContextError};
pub use filter::TestFilter;
pub use runner::{NUM_ITERATIONS, REPORT_NAME_WIDTH, Runner, TestReport, format_report_line};
pub use stats::{SampleBuffer, StatsError, median_ms};
pub use test_case::{Hook, HookTable, Phase, PerfTest};
pub use timer::{ManualTimer, MonotonicTimer, Timer};
