//! Monotonic timestamps for the timed window.

// Elapsed microseconds fit comfortably in i64 for any realistic run.
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use std::cell::Cell;
use std::rc::Rc;

/// Source of monotonic timestamps in microseconds.
pub trait Timer {
    /// Current timestamp in microseconds. Only differences are meaningful.
    fn now_micros(&self) -> i64;
}

/// Timer backed by the TSC-calibrated `quanta` clock.
pub struct MonotonicTimer {
    clock: quanta::Clock,
    origin: quanta::Instant,
}

impl MonotonicTimer {
    pub fn new() -> Self {
        let clock = quanta::Clock::new();
        let origin = clock.now();
        Self { clock, origin }
    }
}

impl Default for MonotonicTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for MonotonicTimer {
    fn now_micros(&self) -> i64 {
        self.clock.now().duration_since(self.origin).as_micros() as i64
    }
}

/// Hand-driven timer for deterministic tests.
///
/// Clones share the same reading, so a hook can advance the clock the runner
/// is reading from.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now: Rc<Cell<i64>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `micros`.
    pub fn advance(&self, micros: i64) {
        self.now.set(self.now.get() + micros);
    }
}

impl Timer for ManualTimer {
    fn now_micros(&self) -> i64 {
        self.now.get()
    }
}
