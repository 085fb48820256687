//! Crash detection in fixture logs

use fwt_domain::constants::CRASH_MARKERS;

/// A crash marker found in the logs, with the line it appeared on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReport {
    pub marker: &'static str,
    pub line: String,
}

/// First log line containing a crash marker
pub fn detect_crash(logs: &str) -> Option<CrashReport> {
    logs.lines().find_map(|line| {
        CRASH_MARKERS
            .iter()
            .find(|marker| line.contains(*marker))
            .map(|marker| CrashReport {
                marker: *marker,
                line: line.trim().to_string(),
            })
    })
}
