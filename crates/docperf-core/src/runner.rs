//! Benchmark execution runner.

use crate::context::Context;
use crate::filter::TestFilter;
use crate::stats::SampleBuffer;
use crate::test_case::{PerfTest, Phase};
use crate::timer::{MonotonicTimer, Timer};
use anyhow::{Context as _, Result};
use std::io::Write;

/// Timed iterations per test.
pub const NUM_ITERATIONS: usize = 100;

/// Width the test name is right-justified to in a report line.
pub const REPORT_NAME_WIDTH: usize = 25;

/// Outcome of one executed test.
#[derive(Debug, Clone, PartialEq)]
pub struct TestReport {
    pub name: String,
    /// Lower-middle median of the samples, in milliseconds.
    pub median_ms: f64,
    /// Number of timed iterations behind the median.
    pub iterations: usize,
}

/// Format a report line (without the trailing newline).
///
/// Names longer than [`REPORT_NAME_WIDTH`] are printed in full.
pub fn format_report_line(name: &str, median_ms: f64) -> String {
    format!("{name:>REPORT_NAME_WIDTH$}, {median_ms:.6}")
}

/// Runs benchmarks strictly one after another.
///
/// Each selected test goes through: fresh zeroed context, `setup`, the timed
/// loop (`before`, timed `task`, `after`), `teardown`, median reduction, one
/// report line. A failing hook aborts the whole run; lines already written
/// stay written and nothing else is reported.
pub struct Runner<T: Timer = MonotonicTimer> {
    timer: T,
    iterations: usize,
}

impl Runner<MonotonicTimer> {
    /// Runner with the default clock and [`NUM_ITERATIONS`] iterations.
    pub fn new() -> Self {
        Self::with_timer(MonotonicTimer::new())
    }
}

impl Default for Runner<MonotonicTimer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Timer> Runner<T> {
    /// Runner reading timestamps from `timer`.
    pub fn with_timer(timer: T) -> Self {
        Self {
            timer,
            iterations: NUM_ITERATIONS,
        }
    }

    /// Override the iteration count. The median index follows the count.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run every test selected by `filter`, in order, writing one report
    /// line per executed test to `out`.
    pub fn run<W: Write>(
        &self,
        tests: &[Box<dyn PerfTest>],
        filter: &TestFilter,
        out: &mut W,
    ) -> Result<Vec<TestReport>> {
        anyhow::ensure!(self.iterations > 0, "Iteration count must be at least 1");

        let mut samples = SampleBuffer::new(self.iterations);
        let mut reports = Vec::new();

        for test in tests {
            let name = test.name();
            if !filter.should_run(name) {
                continue;
            }

            tracing::debug!(
                "Running {} ({} iterations, {} byte context)",
                name,
                self.iterations,
                test.context_size()
            );

            let median_ms = self.run_test(test.as_ref(), &mut samples)?;

            writeln!(out, "{}", format_report_line(name, median_ms))
                .context("Failed to write report line")?;
            out.flush().context("Failed to flush report output")?;

            reports.push(TestReport {
                name: name.to_string(),
                median_ms,
                iterations: samples.len(),
            });
        }

        tracing::info!("Executed {} of {} tests", reports.len(), tests.len());
        Ok(reports)
    }

    /// Drive one test through its lifecycle and return its median.
    fn run_test(&self, test: &dyn PerfTest, samples: &mut SampleBuffer) -> Result<f64> {
        let name = test.name();
        let mut ctx = Context::zeroed(test.context_size());

        check(test.setup(&mut ctx), name, Phase::Setup)?;

        for i in 0..self.iterations {
            check(test.before(&mut ctx), name, Phase::Before)?;

            let start = self.timer.now_micros();
            let outcome = test.task(&mut ctx);
            let elapsed = self.timer.now_micros() - start;
            check(outcome, name, Phase::Task)?;
            samples.record(i, elapsed);

            check(test.after(&mut ctx), name, Phase::After)?;
        }

        check(test.teardown(&mut ctx), name, Phase::Teardown)?;

        let median = samples
            .median_ms()
            .with_context(|| format!("Failed to reduce samples for {name}"))?;
        Ok(median)
    }
}

fn check(result: Result<()>, name: &str, phase: Phase) -> Result<()> {
    result.with_context(|| format!("Test '{name}' failed during {phase}"))
}
