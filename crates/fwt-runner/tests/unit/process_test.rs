//! Tests for test process execution

use std::time::{Duration, Instant};

use fwt_domain::TestStatus;
use fwt_runner::{EntryPoint, classify, run_test_process};
use tempfile::TempDir;

fn shell(script: &str) -> EntryPoint {
    EntryPoint::new("sh").with_arg("-c").with_arg(script)
}

#[tokio::test]
async fn test_captures_output_and_exit_code() {
    let dir = TempDir::new().unwrap();
    let entry = shell("echo out; echo err >&2; exit 3");

    let outcome = run_test_process(&entry, dir.path(), &[], Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(outcome.exit_code, Some(3));
    assert_eq!(outcome.stdout, "out\n");
    assert_eq!(outcome.stderr, "err\n");
    assert!(!outcome.timed_out);
    assert!(!outcome.success());
}

#[tokio::test]
async fn test_runs_in_cwd_with_args_and_env() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
    let entry = shell("cat marker.txt; echo \" $1 $FWT_TEST_VAR\"")
        .with_env("FWT_TEST_VAR", "set");

    let args = vec!["--server_port".to_string()];
    let outcome = run_test_process(&entry, dir.path(), &args, Duration::from_secs(10))
        .await
        .unwrap();

    // `sh -c script a b` binds a to $0 and b to $1
    assert_eq!(outcome.stdout, "here  set\n");
    assert!(outcome.success());
}

#[tokio::test]
async fn test_timeout_kills_the_process() {
    let dir = TempDir::new().unwrap();
    let entry = shell("echo started; sleep 30");

    let outcome = run_test_process(&entry, dir.path(), &[], Duration::from_millis(300))
        .await
        .unwrap();

    assert!(outcome.timed_out);
    assert_eq!(outcome.exit_code, None);
    assert!(outcome.elapsed < Duration::from_secs(10));
    assert!(!outcome.success());
}

#[tokio::test]
async fn test_background_helper_does_not_hide_markers() {
    let dir = TempDir::new().unwrap();
    let entry = shell("sleep 8 & echo '[FAIL] status was 500'; exit 1");

    let started = Instant::now();
    let outcome = run_test_process(&entry, dir.path(), &[], Duration::from_secs(30))
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(4), "took {:?}", started.elapsed());
    assert_eq!(outcome.exit_code, Some(1));
    assert!(!outcome.timed_out);
    assert_eq!(outcome.stdout, "[FAIL] status was 500\n");

    let classified = classify("test_orphan", &outcome, Duration::from_secs(30));
    assert_eq!(classified.status, TestStatus::Failed);
    assert_eq!(classified.failed_assertions, vec!["status was 500"]);
}

#[tokio::test]
async fn test_output_read_before_a_stuck_pipe_is_kept() {
    let dir = TempDir::new().unwrap();
    // A helper in its own session escapes the group kill and keeps stdout open.
    let entry = shell(
        "echo '[FAIL] kept'; if command -v setsid >/dev/null; then setsid sleep 8 2>/dev/null & fi; exit 1",
    );

    let outcome = run_test_process(&entry, dir.path(), &[], Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(outcome.exit_code, Some(1));
    assert!(outcome.stdout.starts_with("[FAIL] kept"), "got {:?}", outcome.stdout);
}

#[tokio::test]
async fn test_missing_program_fails_to_spawn() {
    let dir = TempDir::new().unwrap();
    let entry = EntryPoint::new("/nonexistent/program");

    let result = run_test_process(&entry, dir.path(), &[], Duration::from_secs(1)).await;
    assert!(result.is_err());
}

#[test]
fn test_empty_script_is_not_passed() {
    let entry = EntryPoint::new("python3").with_arg("");
    assert_eq!(entry.program(), "python3");
    assert!(entry.args().is_empty());
}
