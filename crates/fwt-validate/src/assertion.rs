//! Assertion failure types
//!
//! Every failure remembers the source line of the check that produced it, so
//! a failed test points back at the driver code instead of at this crate.

use std::fmt;
use std::panic::Location;

use thiserror::Error;

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    message: String,
    location: Option<String>,
}

impl AssertionFailure {
    /// Create a failure located at the caller
    #[track_caller]
    pub fn new<S: Into<String>>(message: S) -> Self {
        let caller = Location::caller();
        Self {
            message: message.into(),
            location: Some(format!("{}:{}", caller.file(), caller.line())),
        }
    }

    /// Create a failure without a source location
    pub fn unlocated<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Prefix the message with caller-supplied context
    pub fn with_context<S: AsRef<str>>(mut self, context: S) -> Self {
        let context = context.as_ref();
        if !context.is_empty() {
            self.message = format!("{context}: {}", self.message);
        }
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} (at {location})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for AssertionFailure {}

/// All failures recorded by a collector, raised once at the end of a test
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} assertion(s) failed:\n{}", .failures.len(), render(.failures))]
pub struct AssertionFailures {
    failures: Vec<AssertionFailure>,
}

impl AssertionFailures {
    pub fn new(failures: Vec<AssertionFailure>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[AssertionFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

fn render(failures: &[AssertionFailure]) -> String {
    failures
        .iter()
        .enumerate()
        .map(|(i, f)| format!("  {}. {f}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
