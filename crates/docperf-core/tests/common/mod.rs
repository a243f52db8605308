//! Instrumented fakes shared by the runner integration tests.

#![allow(dead_code)]

use anyhow::Result;
use docperf_core::{Context, ManualTimer, PerfTest};
use std::cell::RefCell;
use std::rc::Rc;

/// Shared log of `(test, hook)` events in call order.
pub type Trace = Rc<RefCell<Vec<(String, &'static str)>>>;

pub fn new_trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// Hook names recorded for `test`, in order.
pub fn hooks_for(trace: &Trace, test: &str) -> Vec<&'static str> {
    trace
        .borrow()
        .iter()
        .filter(|(name, _)| name == test)
        .map(|(_, hook)| *hook)
        .collect()
}

/// Test implementing all five hooks, recording each call and advancing a
/// manual clock by a fixed amount per hook.
pub struct RecordingTest {
    pub name: String,
    pub context_size: usize,
    pub trace: Trace,
    pub timer: ManualTimer,
    /// Microseconds spent in `task`.
    pub task_micros: i64,
    /// Microseconds spent in each of `before`/`after`.
    pub untimed_micros: i64,
    /// Scratch contents observed by `setup`.
    pub seen_scratch: Rc<RefCell<Vec<u8>>>,
}

impl RecordingTest {
    pub fn new(name: &str, trace: &Trace, timer: &ManualTimer) -> Self {
        Self {
            name: name.to_string(),
            context_size: 32,
            trace: Rc::clone(trace),
            timer: timer.clone(),
            task_micros: 7,
            untimed_micros: 1000,
            seen_scratch: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn record(&self, hook: &'static str) {
        self.trace.borrow_mut().push((self.name.clone(), hook));
    }
}

impl PerfTest for RecordingTest {
    fn name(&self) -> &str {
        &self.name
    }

    fn context_size(&self) -> usize {
        self.context_size
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        self.record("setup");
        *self.seen_scratch.borrow_mut() = ctx.scratch().to_vec();
        // Dirty the scratch so a leak into the next test would show
        ctx.scratch_mut().fill(0xAB);
        ctx.insert(0usize);
        Ok(())
    }

    fn before(&self, _ctx: &mut Context) -> Result<()> {
        self.record("before");
        self.timer.advance(self.untimed_micros);
        Ok(())
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        self.record("task");
        *ctx.state_mut::<usize>()? += 1;
        self.timer.advance(self.task_micros);
        Ok(())
    }

    fn after(&self, _ctx: &mut Context) -> Result<()> {
        self.record("after");
        self.timer.advance(self.untimed_micros);
        Ok(())
    }

    fn teardown(&self, ctx: &mut Context) -> Result<()> {
        self.record("teardown");
        assert_eq!(*ctx.state::<usize>()?, 100);
        Ok(())
    }
}
