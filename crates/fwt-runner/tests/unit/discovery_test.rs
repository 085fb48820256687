//! Tests for test discovery and selection

use std::collections::HashSet;

use fwt_domain::TestType;
use fwt_runner::{discover_tests, parse_test_list, select_tests};
use tempfile::TempDir;

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn set(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn tests_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in ["test_b", "test_a", "control_test_x", "helpers"] {
        std::fs::create_dir(dir.path().join(name)).unwrap();
    }
    std::fs::write(dir.path().join("test_file.txt"), "not a test").unwrap();
    dir
}

#[test]
fn test_discover_server_tests_sorted() {
    let dir = tests_root();
    let found = discover_tests(dir.path(), TestType::Server).unwrap();
    assert_eq!(found, ids(&["test_a", "test_b"]));
}

#[test]
fn test_discover_control_tests() {
    let dir = tests_root();
    let found = discover_tests(dir.path(), TestType::Control).unwrap();
    assert_eq!(found, ids(&["control_test_x"]));
}

#[test]
fn test_missing_tests_dir_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = discover_tests(&dir.path().join("nope"), TestType::Server).unwrap_err();
    assert!(err.to_string().contains("Tests directory not found"));
}

#[test]
fn test_parse_test_list() {
    assert_eq!(
        parse_test_list("test_a, test_b  test_c,test_a"),
        ids(&["test_a", "test_b", "test_c"])
    );
    assert!(parse_test_list("  , ").is_empty());
}

#[test]
fn test_select_everything_by_default() {
    let all = ids(&["test_a", "test_b"]);
    let selection = select_tests(&all, &set(&[]), &set(&[]));
    assert_eq!(selection.run, all);
    assert!(selection.skipped.is_empty());
}

#[test]
fn test_include_restricts_the_run() {
    let all = ids(&["test_a", "test_b", "test_c"]);
    let selection = select_tests(&all, &set(&[]), &set(&["test_b", "test_missing"]));
    assert_eq!(selection.run, ids(&["test_b"]));
    assert!(selection.skipped.is_empty());
}

#[test]
fn test_skip_wins_over_include() {
    let all = ids(&["test_a", "test_b", "test_c"]);
    let selection = select_tests(&all, &set(&["test_b"]), &set(&["test_a", "test_b"]));
    assert_eq!(selection.run, ids(&["test_a"]));
    assert_eq!(selection.skipped, ids(&["test_b"]));
}
