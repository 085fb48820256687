//! # Firewall Tester Domain
//!
//! Core types shared by every layer of the firewall tester:
//!
//! - `entities` - test result records and the run-level summary
//! - `value_objects` - test kinds and the `[FAIL]` marker convention
//! - `error` - the runner error taxonomy
//! - `constants` - fixture file names and crash markers
//!
//! The domain crate has no I/O. Everything here is plain data plus the
//! rules that govern it (a test result is completed exactly once, skip
//! wins over include, failures decide the exit code).

pub mod constants;
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{PendingTest, RunSummary, StatusCounts, TestOutcome, TestResult, TestStatus};
pub use error::{Error, Result};
pub use value_objects::{TestType, fail_marker_line, parse_fail_marker};
