//! Test selection by name.

/// Set of test names requested on the command line.
///
/// An empty filter selects every test. Otherwise a test runs only when its
/// name is an exact, case-sensitive match for one of the requested names.
/// Names that match no registered test are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestFilter {
    names: Vec<String>,
}

impl TestFilter {
    /// Filter that selects every test.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter that selects only the given names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the test called `name` should execute.
    pub fn should_run(&self, name: &str) -> bool {
        self.names.is_empty() || self.names.iter().any(|n| n == name)
    }

    /// True when no names were requested.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Requested names, in the order given.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for TestFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
