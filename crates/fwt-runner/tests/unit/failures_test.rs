//! Tests for failure extraction from test output

use fwt_runner::failures::{collect_fail_markers, extract_error, last_stderr_line};

#[test]
fn test_markers_from_stdout_then_stderr() {
    let stdout = "starting\n[FAIL] Status codes are not the same: 500 vs 200 (at test.py:12)\n";
    let stderr = "  [FAIL] Event missing\n[FAIL]\n";

    assert_eq!(
        collect_fail_markers(stdout, stderr),
        vec![
            "Status codes are not the same: 500 vs 200 (at test.py:12)",
            "Event missing",
        ]
    );
}

#[test]
fn test_python_traceback() {
    let stderr = r#"Traceback (most recent call last):
  File "/home/runner/work/fw/server_tests/test_sql/test.py", line 40, in <module>
    run_test(args)
  File "/home/runner/work/fw/server_tests/test_sql/test.py", line 22, in run_test
    assert res.status_code == 500
AssertionError: expected 500
"#;
    assert_eq!(
        extract_error(stderr).as_deref(),
        Some("AssertionError: expected 500 (at test_sql/test.py:22)")
    );
}

#[test]
fn test_rust_panic() {
    let stderr = "thread 'main' panicked at src/bin/driver.rs:14:5:\nassertion failed: ok\nnote: run with `RUST_BACKTRACE=1`\n";
    assert_eq!(
        extract_error(stderr).as_deref(),
        Some("assertion failed: ok (at src/bin/driver.rs:14:5)")
    );
}

#[test]
fn test_legacy_rust_panic() {
    let stderr = "thread 'main' panicked at 'boom', src/main.rs:3:5\n";
    assert_eq!(extract_error(stderr).as_deref(), Some("boom (at src/main.rs:3:5)"));
}

#[test]
fn test_no_structured_error() {
    assert_eq!(extract_error("connection refused\n"), None);
}

#[test]
fn test_last_stderr_line() {
    assert_eq!(
        last_stderr_line("first\n  second  \n\n").as_deref(),
        Some("second")
    );
    assert_eq!(last_stderr_line("\n \n"), None);
}
