//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TestType`] | Which kind of test directory the runner picks up |
//! | [`fail_marker_line`] / [`parse_fail_marker`] | The `[FAIL]` line convention shared by test processes and the runner |

/// Structured assertion failure lines
pub mod fail_marker;
/// Test kind selection
pub mod test_type;

pub use fail_marker::{fail_marker_line, parse_fail_marker};
pub use test_type::TestType;
