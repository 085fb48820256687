//! Domain entities
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`TestResult`] | Immutable outcome of one test case |
//! | [`PendingTest`] | A test that has started but not completed |
//! | [`RunSummary`] | Aggregated results of a whole run |

/// Per-test result record and its lifecycle
pub mod test_result;
/// Run-level aggregation
pub mod summary;

pub use summary::{RunSummary, StatusCounts};
pub use test_result::{PendingTest, TestOutcome, TestResult, TestStatus};
