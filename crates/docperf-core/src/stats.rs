//! Sample storage and reduction.

// Median samples are microsecond counts well inside f64's exact range.
#![allow(clippy::cast_precision_loss)]

use thiserror::Error;

/// Errors from reducing a sample set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("Cannot reduce an empty sample set")]
    Empty,
}

/// Reduce raw microsecond samples to the reported median in milliseconds.
///
/// Sorts `samples` in place and picks the element at index `N/2 - 1`, the
/// lower of the two middle values for even `N`. The two middle values are
/// never averaged: for 100 samples the 50th smallest is reported.
pub fn median_ms(samples: &mut [i64]) -> Result<f64, StatsError> {
    if samples.is_empty() {
        return Err(StatsError::Empty);
    }

    samples.sort_unstable();
    let idx = (samples.len() / 2).saturating_sub(1);
    Ok(samples[idx] as f64 / 1e3)
}

/// Fixed-length buffer of elapsed-time samples, one slot per iteration.
///
/// Allocated once per run and overwritten by every test, so a test never
/// observes the previous test's samples.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<i64>,
}

impl SampleBuffer {
    /// Allocate a zeroed buffer with `len` slots.
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0; len],
        }
    }

    /// Store the sample for iteration `idx`.
    pub fn record(&mut self, idx: usize, elapsed_micros: i64) {
        self.samples[idx] = elapsed_micros;
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.samples
    }

    /// Sort the buffer and return its median in milliseconds.
    pub fn median_ms(&mut self) -> Result<f64, StatsError> {
        median_ms(&mut self.samples)
    }
}
