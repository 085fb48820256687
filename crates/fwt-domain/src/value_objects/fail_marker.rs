//! `[FAIL] <message>` lines.
//!
//! A test process prints one marker line per failed soft assertion. The
//! runner scans the captured output for these lines to build the
//! per-assertion breakdown of a failed test.

use crate::constants::FAIL_MARKER;

/// Render a failure message as a single marker line.
///
/// Line breaks inside the message are folded so the marker survives
/// line-based parsing.
pub fn fail_marker_line(message: &str) -> String {
    let folded = message
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{FAIL_MARKER} {folded}")
}

/// Extract the message from a marker line, if the line is one.
pub fn parse_fail_marker(line: &str) -> Option<&str> {
    let message = line.trim_start().strip_prefix(FAIL_MARKER)?.trim();
    (!message.is_empty()).then_some(message)
}
