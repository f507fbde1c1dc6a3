//! Failure reporting through an injected test context
//!
//! The harness never returns errors to the caller. Everything that goes wrong
//! while running an [`EndpointTest`](crate::EndpointTest), and every failed
//! assertion made by its expectations, is reported to a [`TestContext`].
//!
//! Two contexts are provided:
//!
//! - [`Failures`] collects failures and lets the caller inspect them;
//! - [`AssertContext`] collects failures and panics at the end of the test
//!   if any were reported, which is what a `#[test]` function usually wants.

use std::fmt::{self, Debug, Display, Formatter};

/// A failure reported while running a named test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Name of the test case that failed
    pub case: String,

    /// Failure description
    pub message: String,
}

impl Failure {
    /// Creates a new [`Failure`]
    #[inline]
    pub fn new(case: impl Into<String>, message: impl Into<String>) -> Self {
        Self { case: case.into(), message: message.into() }
    }
}

impl Display for Failure {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.case, self.message)
    }
}

/// Describes a sink for test failures.
///
/// Reporting a failure must not stop the process or unwind the stack;
/// the caller decides what to do with failures once the test is over.
pub trait TestContext {
    /// Records a failure
    fn report_failure(&mut self, failure: Failure);
}

impl<T: TestContext + ?Sized> TestContext for &mut T {
    #[inline]
    fn report_failure(&mut self, failure: Failure) {
        (**self).report_failure(failure)
    }
}

/// A [`TestContext`] that collects failures in the order they were reported
#[derive(Debug, Default, Clone)]
pub struct Failures {
    items: Vec<Failure>
}

impl TestContext for Failures {
    #[inline]
    fn report_failure(&mut self, failure: Failure) {
        self.items.push(failure);
    }
}

impl Failures {
    /// Creates an empty collection
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if at least one failure has been reported
    #[inline]
    pub fn has_failed(&self) -> bool {
        !self.items.is_empty()
    }

    /// Returns the number of reported failures
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing has been reported
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the reported failures
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Failure> {
        self.items.iter()
    }

    /// Returns the failure messages without case names
    pub fn messages(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(|failure| failure.message.as_str())
            .collect()
    }

    /// Unwraps the reported failures
    #[inline]
    pub fn into_inner(self) -> Vec<Failure> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Failures {
    type Item = &'a Failure;
    type IntoIter = std::slice::Iter<'a, Failure>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for Failures {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} failure(s) reported", self.items.len())?;
        for failure in &self.items {
            write!(f, "\n  - {failure}")?;
        }
        Ok(())
    }
}

/// A [`TestContext`] that fails the current test if anything was reported.
///
/// Failures are collected while the test runs. When the context is dropped,
/// or [`finish`](Self::finish) is called, it panics with every reported
/// failure listed. It never panics while the thread is already unwinding.
///
/// # Example
/// ```should_panic
/// use volga_endpoint_test::{AssertContext, Failure, TestContext};
///
/// let mut ctx = AssertContext::new();
/// ctx.report_failure(Failure::new("get user", "expected 200, got 404"));
/// ctx.finish();
/// ```
#[derive(Default)]
pub struct AssertContext {
    failures: Failures
}

impl Debug for AssertContext {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertContext")
            .field("failures", &self.failures.len())
            .finish()
    }
}

impl TestContext for AssertContext {
    #[inline]
    fn report_failure(&mut self, failure: Failure) {
        self.failures.report_failure(failure);
    }
}

impl AssertContext {
    /// Creates a new [`AssertContext`]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the failures reported so far
    #[inline]
    pub fn failures(&self) -> &Failures {
        &self.failures
    }

    /// Ends the test.
    ///
    /// # Panics
    /// Panics if at least one failure has been reported.
    #[inline]
    pub fn finish(self) {
        drop(self)
    }
}

impl Drop for AssertContext {
    fn drop(&mut self) {
        if self.failures.has_failed() && !std::thread::panicking() {
            panic!("{}", self.failures);
        }
    }
}

/// A test context scoped to a single named test case.
///
/// This is what expectations receive. Failures reported through it are
/// tagged with the case name and forwarded to the caller's context.
pub struct CaseContext<'c> {
    case: &'c str,
    inner: &'c mut dyn TestContext,
    failed: bool,
}

impl Debug for CaseContext<'_> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseContext")
            .field("case", &self.case)
            .field("failed", &self.failed)
            .finish()
    }
}

impl TestContext for CaseContext<'_> {
    fn report_failure(&mut self, failure: Failure) {
        #[cfg(feature = "tracing")]
        tracing::error!(case = %failure.case, "{}", failure.message);

        self.failed = true;
        self.inner.report_failure(failure);
    }
}

impl<'c> CaseContext<'c> {
    /// Creates a context for the `case` test case that reports into `inner`
    #[inline]
    pub fn new(case: &'c str, inner: &'c mut dyn TestContext) -> Self {
        Self { case, inner, failed: false }
    }

    /// Returns the name of the test case
    #[inline]
    pub fn name(&self) -> &str {
        self.case
    }

    /// Returns `true` if this case has reported at least one failure
    #[inline]
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Reports a failure for this case
    #[inline]
    pub fn fail(&mut self, message: impl Into<String>) {
        let failure = Failure::new(self.case, message);
        self.report_failure(failure);
    }

    /// Reports `message` if `condition` is `false`.
    ///
    /// Returns `condition`.
    #[inline]
    pub fn check(&mut self, condition: bool, message: impl Into<String>) -> bool {
        if !condition {
            self.fail(message);
        }
        condition
    }

    /// Reports a failure if `actual` is not equal to `expected`.
    ///
    /// Returns `true` if the values are equal.
    pub fn check_eq<A, E>(&mut self, what: &str, actual: A, expected: E) -> bool
    where
        A: PartialEq<E> + Debug,
        E: Debug
    {
        if actual == expected {
            return true;
        }

        self.fail(format!("{what}: expected {expected:?}, got {actual:?}"));
        false
    }
}
