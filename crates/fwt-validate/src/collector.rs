//! Soft assertion collector
//!
//! A collector is an explicit context object handed to every check of a
//! test. Failed checks are recorded and the test keeps going; `finish`
//! raises one aggregate error at the end.
//!
//! ```ignore
//! let mut collector = AssertionCollector::new();
//! for _ in 0..100 {
//!     let response = app.get("/api/pets/").await?;
//!     collector.soft_assert_response_code_is(&response, 200, "benign request");
//! }
//! collector.finish()?;
//! ```

use std::fmt::Debug;
use std::io::{self, Write};
use std::path::Path;

use fwt_domain::fail_marker_line;
use serde_json::Value;
use tracing::{debug, warn};

use crate::assertion::{AssertionFailure, AssertionFailures};
use crate::event::assert_event_contains_subset_file;
use crate::subset::check_subset;

/// Accumulates failed checks for one test
#[derive(Debug, Default)]
pub struct AssertionCollector {
    failures: Vec<AssertionFailure>,
    checks: usize,
}

impl AssertionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure if `condition` is false. Returns `condition`.
    #[track_caller]
    pub fn soft_assert<S: Into<String>>(&mut self, condition: bool, message: S) -> bool {
        self.checks += 1;
        if !condition {
            self.push(AssertionFailure::new(message));
        }
        condition
    }

    #[track_caller]
    pub fn soft_assert_eq<T: PartialEq + Debug>(
        &mut self,
        actual: &T,
        expected: &T,
        message: &str,
    ) -> bool {
        let equal = actual == expected;
        self.soft_assert(
            equal,
            format!("{message}: expected {expected:?}, got {actual:?}"),
        )
    }

    /// Record that `expected` must be contained in `actual`
    #[track_caller]
    pub fn soft_assert_subset(&mut self, actual: &Value, expected: &Value) -> bool {
        self.checks += 1;
        match check_subset(actual, expected) {
            Ok(()) => true,
            Err(mismatch) => {
                self.push(AssertionFailure::new(mismatch.to_string()));
                false
            }
        }
    }

    /// Subset check against an expectation stored in a JSON file
    #[track_caller]
    pub fn soft_assert_subset_file(&mut self, actual: &Value, expected_file: &Path) -> bool {
        let result = assert_event_contains_subset_file(actual, expected_file);
        self.check(result).is_some()
    }

    /// Record an unconditional failure
    #[track_caller]
    pub fn add_failure<S: Into<String>>(&mut self, message: S) {
        self.checks += 1;
        self.push(AssertionFailure::new(message));
    }

    /// Soften a hard assertion: record its failure and continue
    pub fn check<T>(&mut self, result: Result<T, AssertionFailure>) -> Option<T> {
        self.checks += 1;
        match result {
            Ok(value) => Some(value),
            Err(failure) => {
                self.push(failure);
                None
            }
        }
    }

    pub fn failures(&self) -> &[AssertionFailure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of checks run so far, passed or failed
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Write one `[FAIL]` line per recorded failure
    pub fn write_markers<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for failure in &self.failures {
            writeln!(writer, "{}", fail_marker_line(&failure.to_string()))?;
        }
        writer.flush()
    }

    /// End the test: print the markers on stdout and raise the aggregate
    pub fn finish(self) -> Result<(), AssertionFailures> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.finish_to(&mut handle)
    }

    /// Like `finish`, writing the markers to `writer`
    pub fn finish_to<W: Write>(self, writer: &mut W) -> Result<(), AssertionFailures> {
        if self.failures.is_empty() {
            debug!(checks = self.checks, "All soft assertions passed");
            return Ok(());
        }

        if let Err(e) = self.write_markers(writer) {
            warn!(
                error = %e,
                failures = self.failures.len(),
                "Failed to write assertion markers"
            );
        }

        Err(AssertionFailures::new(self.failures))
    }

    fn push(&mut self, failure: AssertionFailure) {
        debug!(failure = %failure, "Soft assertion failed");
        self.failures.push(failure);
    }
}
