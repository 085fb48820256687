//! Tests for the test result lifecycle

use fwt_domain::{PendingTest, TestOutcome, TestResult, TestStatus};

#[test]
fn test_complete_records_timestamps_and_outcome() {
    let pending = PendingTest::start("test_sql_injection");
    assert_eq!(pending.name(), "test_sql_injection");

    let result = pending.complete(
        TestOutcome::failed("2 assertion(s) failed")
            .with_assertions(vec!["a".to_string(), "b".to_string()]),
    );

    assert_eq!(result.name(), "test_sql_injection");
    assert_eq!(result.status(), TestStatus::Failed);
    assert!(result.end_time() >= result.start_time());
    assert_eq!(result.error_message(), Some("2 assertion(s) failed"));
    assert_eq!(result.failed_assertions(), ["a", "b"]);
}

#[test]
fn test_skipped_result_has_no_error() {
    let result = TestResult::skipped("test_wave_attack");

    assert_eq!(result.status(), TestStatus::Skipped);
    assert!(result.error_message().is_none());
    assert!(result.failed_assertions().is_empty());
}

#[test]
fn test_force_failed_overrides_status_and_keeps_assertions() {
    let outcome = TestOutcome::timed_out("Test timed out")
        .with_assertions(vec!["x".to_string()])
        .force_failed("Crash detected");

    assert_eq!(outcome.status, TestStatus::Failed);
    assert_eq!(
        outcome.error_message.as_deref(),
        Some("Crash detected\nTest timed out")
    );
    assert_eq!(outcome.failed_assertions, vec!["x".to_string()]);

    let passed = TestOutcome::passed().force_failed("Crash detected");
    assert_eq!(passed.status, TestStatus::Failed);
    assert_eq!(passed.error_message.as_deref(), Some("Crash detected"));
}

#[test]
fn test_status_failure_classification() {
    assert!(TestStatus::Failed.is_failure());
    assert!(TestStatus::TimedOut.is_failure());
    assert!(!TestStatus::Passed.is_failure());
    assert!(!TestStatus::Skipped.is_failure());
    assert_eq!(TestStatus::TimedOut.to_string(), "timed_out");
}

#[test]
fn test_status_serialization() {
    let json = serde_json::to_string(&TestStatus::TimedOut).unwrap();
    assert_eq!(json, "\"timed_out\"");
}
