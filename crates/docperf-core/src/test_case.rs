//! Benchmark descriptors.

use crate::context::Context;
use anyhow::Result;

/// Lifecycle phase of a test, used to label hook failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Before,
    Task,
    After,
    Teardown,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Before => "before",
            Self::Task => "task",
            Self::After => "after",
            Self::Teardown => "teardown",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A named benchmark and its lifecycle hooks.
///
/// Only `task` is timed. Every other hook defaults to a no-op, so a test
/// implements just the phases it needs. All hooks receive the per-test
/// [`Context`] the runner created for this execution.
pub trait PerfTest {
    /// Name used for filtering and in the report line.
    fn name(&self) -> &str;

    /// Size in bytes of the zeroed scratch buffer in the test's context.
    fn context_size(&self) -> usize {
        0
    }

    /// Runs once before the timed loop.
    fn setup(&self, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Runs before every iteration, outside the timed window.
    fn before(&self, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// The measured operation.
    fn task(&self, ctx: &mut Context) -> Result<()>;

    /// Runs after every iteration, outside the timed window.
    fn after(&self, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }

    /// Runs once after the timed loop.
    fn teardown(&self, _ctx: &mut Context) -> Result<()> {
        Ok(())
    }
}

/// Boxed lifecycle callback.
pub type Hook = Box<dyn Fn(&mut Context) -> Result<()>>;

/// Descriptor built from optional closures instead of a dedicated type.
///
/// ```
/// use docperf_core::HookTable;
///
/// let test = HookTable::new("noop", |_ctx| Ok(()))
///     .with_context_size(16)
///     .with_setup(|ctx| {
///         ctx.insert(0u64);
///         Ok(())
///     });
/// # let _ = test;
/// ```
pub struct HookTable {
    name: String,
    context_size: usize,
    setup: Option<Hook>,
    before: Option<Hook>,
    task: Hook,
    after: Option<Hook>,
    teardown: Option<Hook>,
}

impl HookTable {
    pub fn new(
        name: impl Into<String>,
        task: impl Fn(&mut Context) -> Result<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            context_size: 0,
            setup: None,
            before: None,
            task: Box::new(task),
            after: None,
            teardown: None,
        }
    }

    #[must_use]
    pub fn with_context_size(mut self, size: usize) -> Self {
        self.context_size = size;
        self
    }

    #[must_use]
    pub fn with_setup(mut self, hook: impl Fn(&mut Context) -> Result<()> + 'static) -> Self {
        self.setup = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn with_before(mut self, hook: impl Fn(&mut Context) -> Result<()> + 'static) -> Self {
        self.before = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn with_after(mut self, hook: impl Fn(&mut Context) -> Result<()> + 'static) -> Self {
        self.after = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn with_teardown(mut self, hook: impl Fn(&mut Context) -> Result<()> + 'static) -> Self {
        self.teardown = Some(Box::new(hook));
        self
    }

    fn call(hook: Option<&Hook>, ctx: &mut Context) -> Result<()> {
        match hook {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }
}

impl PerfTest for HookTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn context_size(&self) -> usize {
        self.context_size
    }

    fn setup(&self, ctx: &mut Context) -> Result<()> {
        Self::call(self.setup.as_ref(), ctx)
    }

    fn before(&self, ctx: &mut Context) -> Result<()> {
        Self::call(self.before.as_ref(), ctx)
    }

    fn task(&self, ctx: &mut Context) -> Result<()> {
        (self.task)(ctx)
    }

    fn after(&self, ctx: &mut Context) -> Result<()> {
        Self::call(self.after.as_ref(), ctx)
    }

    fn teardown(&self, ctx: &mut Context) -> Result<()> {
        Self::call(self.teardown.as_ref(), ctx)
    }
}

impl std::fmt::Debug for HookTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookTable")
            .field("name", &self.name)
            .field("context_size", &self.context_size)
            .field("setup", &self.setup.is_some())
            .field("before", &self.before.is_some())
            .field("after", &self.after.is_some())
            .field("teardown", &self.teardown.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct TaskOnly;

    impl PerfTest for TaskOnly {
        fn name(&self) -> &'static str {
            "task-only"
        }

        fn task(&self, ctx: &mut Context) -> Result<()> {
            ctx.scratch_mut()[0] += 1;
            Ok(())
        }
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let test = TaskOnly;
        let mut ctx = Context::zeroed(test.context_size().max(1));
        test.setup(&mut ctx).unwrap();
        test.before(&mut ctx).unwrap();
        test.task(&mut ctx).unwrap();
        test.after(&mut ctx).unwrap();
        test.teardown(&mut ctx).unwrap();
        assert_eq!(ctx.scratch(), &[1]);
        assert!(!ctx.has_state());
    }

    #[test]
    fn test_hook_table_absent_hooks() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let trace = Rc::clone(&calls);
        let test = HookTable::new("table", move |_| {
            trace.borrow_mut().push("task");
            Ok(())
        })
        .with_context_size(8);

        let mut ctx = Context::zeroed(test.context_size());
        test.setup(&mut ctx).unwrap();
        test.before(&mut ctx).unwrap();
        test.task(&mut ctx).unwrap();
        test.teardown(&mut ctx).unwrap();

        assert_eq!(test.name(), "table");
        assert_eq!(ctx.scratch().len(), 8);
        assert_eq!(*calls.borrow(), vec!["task"]);
    }

    #[test]
    fn test_hook_table_errors_propagate() {
        let test = HookTable::new("failing", |_| Ok(()))
            .with_setup(|_| anyhow::bail!("fixture missing"));
        let mut ctx = Context::zeroed(0);
        let err = test.setup(&mut ctx).unwrap_err();
        assert_eq!(err.to_string(), "fixture missing");
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Before.to_string(), "before");
        assert_eq!(Phase::Teardown.name(), "teardown");
    }
}
