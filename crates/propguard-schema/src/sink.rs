//! # Error Sink and Validation Session
//!
//! [`ErrorSink`] is the append-only error list of one validation call.
//! [`ValidationSession`] borrows a sink together with the fail-fast /
//! collect-all flag and is threaded through every keyword.
//!
//! Keywords that need to know whether *they* produced errors take an
//! [`ErrorMark`] before running and compare afterwards. A mark is only
//! meaningful for the sink that issued it.

use propguard_core::ValidationError;

/// Position in an [`ErrorSink`], taken before a check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ErrorMark(usize);

/// Append-only collection of errors recorded during one validation.
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Vec<ValidationError>,
}

impl ErrorSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one error.
    pub fn record(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Number of errors recorded so far.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no error has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Current position.
    pub fn mark(&self) -> ErrorMark {
        ErrorMark(self.errors.len())
    }

    /// Returns true if any error was recorded after `mark`.
    ///
    /// # Panics
    ///
    /// Panics if `mark` lies beyond the end of this sink. That can only
    /// happen when a mark from another sink is passed in, which is an
    /// integration bug rather than a validation failure.
    pub fn has_errors_since(&self, mark: ErrorMark) -> bool {
        self.check_mark(mark);
        self.errors.len() > mark.0
    }

    /// Remove and return the errors recorded after `mark`.
    pub fn take_since(&mut self, mark: ErrorMark) -> Vec<ValidationError> {
        self.check_mark(mark);
        self.errors.split_off(mark.0)
    }

    /// Consume the sink.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    fn check_mark(&self, mark: ErrorMark) {
        assert!(
            mark.0 <= self.errors.len(),
            "error mark {} is ahead of sink length {}: mark was taken from a different sink",
            mark.0,
            self.errors.len()
        );
    }
}

/// Per-call validation state: where errors go and whether to stop early.
#[derive(Debug)]
pub struct ValidationSession<'a> {
    sink: &'a mut ErrorSink,
    all_errors: bool,
}

impl<'a> ValidationSession<'a> {
    /// Start a session writing into `sink`.
    pub fn new(sink: &'a mut ErrorSink, all_errors: bool) -> Self {
        Self { sink, all_errors }
    }

    /// Collect-all (`true`) or fail-fast (`false`).
    pub fn all_errors(&self) -> bool {
        self.all_errors
    }

    /// Record one error.
    pub fn record(&mut self, error: ValidationError) {
        self.sink.record(error);
    }

    /// Current sink position.
    pub fn mark(&self) -> ErrorMark {
        self.sink.mark()
    }

    /// Returns true if any error was recorded after `mark`.
    pub fn has_errors_since(&self, mark: ErrorMark) -> bool {
        self.sink.has_errors_since(mark)
    }

    /// Remove and return the errors recorded after `mark`.
    pub fn take_since(&mut self, mark: ErrorMark) -> Vec<ValidationError> {
        self.sink.take_since(mark)
    }
}
