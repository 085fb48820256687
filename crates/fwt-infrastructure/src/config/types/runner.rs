//! Runner configuration types

use std::path::PathBuf;
use std::time::Duration;

use fwt_domain::TestType;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Test selection, parallelism and timing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// Directory holding one sub-directory per test
    pub tests_dir: PathBuf,

    /// Kind of tests to discover
    pub test_type: TestType,

    /// Maximum number of tests running at once
    pub max_parallel_tests: usize,

    /// Per-test timeout in seconds
    pub test_timeout: u64,

    /// Readiness grace period in seconds
    pub sleep_before_test: u64,

    /// Delay handed to drivers after each config push, in seconds
    pub config_update_delay: u64,

    /// Tests reported as skipped without running
    pub skip_tests: Vec<String>,

    /// When non-empty, only these tests run
    pub run_tests: Vec<String>,

    /// Exit successfully even when tests fail
    pub ignore_failures: bool,

    /// Where to write the JSON report, if anywhere
    pub json_report: Option<PathBuf>,
}

impl RunnerConfig {
    pub fn test_timeout(&self) -> Duration {
        Duration::from_secs(self.test_timeout)
    }

    pub fn sleep_before_test(&self) -> Duration {
        Duration::from_secs(self.sleep_before_test)
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tests_dir: PathBuf::from(DEFAULT_TESTS_DIR),
            test_type: TestType::default(),
            max_parallel_tests: DEFAULT_MAX_PARALLEL_TESTS,
            test_timeout: DEFAULT_TEST_TIMEOUT_SECS,
            sleep_before_test: DEFAULT_SLEEP_BEFORE_TEST_SECS,
            config_update_delay: DEFAULT_CONFIG_UPDATE_DELAY_SECS,
            skip_tests: Vec::new(),
            run_tests: Vec::new(),
            ignore_failures: false,
            json_report: None,
        }
    }
}
