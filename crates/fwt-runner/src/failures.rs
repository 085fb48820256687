//! Failure extraction from test process output
//!
//! In order of preference a failed test is explained by:
//! 1. `[FAIL] <message>` lines, one per soft assertion (stdout, then stderr)
//! 2. the exception or panic in stderr, with its source location
//! 3. the last non-empty stderr line
//! 4. the exit status

use fwt_domain::parse_fail_marker;
use once_cell::sync::Lazy;
use regex::Regex;

static PY_FRAME: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"^\s*File "(?P<file>[^"]+)", line (?P<line>\d+)"#).ok());

static PANIC_HEADER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^thread '[^']*' panicked at (?P<location>\S+?):?$").ok());

static LEGACY_PANIC: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^thread '[^']*' panicked at '(?P<message>.*)', (?P<location>\S+)$").ok()
});

const PY_TRACEBACK_HEADER: &str = "Traceback (most recent call last):";

/// Soft assertion messages from `[FAIL]` lines
pub fn collect_fail_markers(stdout: &str, stderr: &str) -> Vec<String> {
    stdout
        .lines()
        .chain(stderr.lines())
        .filter_map(parse_fail_marker)
        .map(str::to_string)
        .collect()
}

/// The error a test died with, as `<error> (at <file:line>)`
pub fn extract_error(stderr: &str) -> Option<String> {
    python_traceback(stderr).or_else(|| rust_panic(stderr))
}

/// Last non-empty line of stderr
pub fn last_stderr_line(stderr: &str) -> Option<String> {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Innermost frame of the first traceback, paired with the exception line
fn python_traceback(stderr: &str) -> Option<String> {
    let frame_re = PY_FRAME.as_ref()?;
    let mut lines = stderr.lines();
    lines.find(|line| line.trim() == PY_TRACEBACK_HEADER)?;

    let mut location = None;
    for line in lines {
        if let Some(caps) = frame_re.captures(line) {
            location = Some(format!("{}:{}", short_path(&caps["file"]), &caps["line"]));
            continue;
        }
        if line.starts_with(char::is_whitespace) || line.trim().is_empty() {
            continue;
        }
        let exception = line.trim();
        return Some(match location {
            Some(location) => format!("{exception} (at {location})"),
            None => exception.to_string(),
        });
    }
    None
}

fn rust_panic(stderr: &str) -> Option<String> {
    let lines: Vec<&str> = stderr.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if let Some(caps) = LEGACY_PANIC.as_ref().and_then(|re| re.captures(line)) {
            return Some(format!("{} (at {})", &caps["message"], &caps["location"]));
        }
        if let Some(caps) = PANIC_HEADER.as_ref().and_then(|re| re.captures(line)) {
            let message = lines
                .get(i + 1)
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .unwrap_or("panic");
            return Some(format!("{message} (at {})", &caps["location"]));
        }
    }
    None
}

/// `/home/runner/work/x/server_tests/test_a/test.py` → `test_a/test.py`
fn short_path(path: &str) -> String {
    let parts: Vec<&str> = path.rsplit('/').take(2).collect();
    parts.into_iter().rev().collect::<Vec<_>>().join("/")
}
