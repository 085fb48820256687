//! Domain layer constants
//!
//! Names of the per-test fixture files and the fatal substrings that mark a
//! crashed application. Infrastructure defaults (ports, image names, paths)
//! live in `fwt_infrastructure::constants`.

// ============================================================================
// TEST DIRECTORY CONVENTIONS
// ============================================================================

/// Directory-name prefix of server tests
pub const SERVER_TEST_PREFIX: &str = "test_";

/// Directory-name prefix of control-server tests
pub const CONTROL_TEST_PREFIX: &str = "control_test_";

/// Runtime configuration pushed to core before the fixture starts
pub const START_CONFIG_FILE: &str = "start_config.json";

/// Firewall lists pushed to core before the fixture starts
pub const START_FIREWALL_FILE: &str = "start_firewall.json";

/// Environment file handed to the fixture container
pub const TEST_ENV_FILE: &str = "test.env";

// ============================================================================
// FAILURE DETECTION
// ============================================================================

/// Prefix of a structured soft-assertion failure line
pub const FAIL_MARKER: &str = "[FAIL]";

/// Substrings in fixture logs that mean the application crashed.
///
/// A match forces the test to `failed` regardless of the exit code of the
/// test process.
pub const CRASH_MARKERS: &[&str] = &[
    "Segmentation fault",
    "segfault",
    "SIGSEGV",
    "SIGABRT",
    "core dumped",
    "double free or corruption",
    "terminate called after throwing",
    "PHP Fatal error",
    "FATAL ERROR:",
    "fatal runtime error",
    "panicked at",
];

/// Maximum characters of an error message shown in the summary table
pub const REPORT_ERROR_MAX_CHARS: usize = 200;
