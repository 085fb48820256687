//! Tests for summary sinks

use fwt_runner::{GithubStepSummary, SummarySink, publish_summary};
use tempfile::TempDir;

#[test]
fn test_step_summary_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.md");
    std::fs::write(&path, "# Earlier step\n").unwrap();
    let sink = GithubStepSummary::new(&path);

    sink.publish("## Firewall Tests").unwrap();
    sink.publish("second").unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "# Earlier step\n## Firewall Tests\nsecond\n");
    assert_eq!(sink.name(), "github-step-summary");
}

#[test]
fn test_unwritable_step_summary_falls_back() {
    let dir = TempDir::new().unwrap();
    let sink = GithubStepSummary::new(dir.path().join("missing/dir/summary.md"));

    assert!(sink.publish("x").is_err());
    // Falls back to the console without panicking
    publish_summary(&sink, "fallback summary");
}

#[test]
#[ignore = "mutates process environment"]
fn test_step_summary_from_env() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("summary.md");
    // SAFETY: ignored test, run alone
    unsafe { std::env::set_var("GITHUB_STEP_SUMMARY", &path) };

    let sink = GithubStepSummary::from_env().unwrap();
    assert_eq!(sink.path(), path.as_path());

    unsafe { std::env::remove_var("GITHUB_STEP_SUMMARY") };
    assert!(GithubStepSummary::from_env().is_none());
}
