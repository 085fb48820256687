//! Tests for logging helpers

use fwt_infrastructure::logging::{annotation_prefix, parse_log_level};
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_github_annotation_prefixes() {
    assert_eq!(annotation_prefix(Level::ERROR), "::error::");
    assert_eq!(annotation_prefix(Level::WARN), "::warning::");
    assert_eq!(annotation_prefix(Level::INFO), "");
    assert_eq!(annotation_prefix(Level::DEBUG), "::debug::");
    assert_eq!(annotation_prefix(Level::TRACE), "::debug::");
}
