use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::test_result::{TestResult, TestStatus};

/// Number of tests per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub timed_out: usize,
}

impl StatusCounts {
    pub fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::Skipped => self.skipped += 1,
            TestStatus::TimedOut => self.timed_out += 1,
        }
    }

    pub fn get(&self, status: TestStatus) -> usize {
        match status {
            TestStatus::Passed => self.passed,
            TestStatus::Failed => self.failed,
            TestStatus::Skipped => self.skipped,
            TestStatus::TimedOut => self.timed_out,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.timed_out
    }
}

/// Aggregated results of a run
///
/// Results arrive in completion order; the summary always presents them
/// sorted by test name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    started_at: DateTime<Utc>,
    wall_time: Duration,
    counts: StatusCounts,
    results: Vec<TestResult>,
}

impl RunSummary {
    pub fn from_results(
        mut results: Vec<TestResult>,
        started_at: DateTime<Utc>,
        wall_time: Duration,
    ) -> Self {
        results.sort_by(|a, b| a.name().cmp(b.name()));

        let mut counts = StatusCounts::default();
        for result in &results {
            counts.record(result.status());
        }

        Self {
            started_at,
            wall_time,
            counts,
            results,
        }
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn counts(&self) -> StatusCounts {
        self.counts
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn wall_time(&self) -> Duration {
        self.wall_time
    }

    pub fn get(&self, name: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.name() == name)
    }

    /// True if any test failed or timed out
    pub fn has_failures(&self) -> bool {
        self.counts.failed > 0 || self.counts.timed_out > 0
    }

    /// Process exit code for this run
    pub fn exit_code(&self, ignore_failures: bool) -> u8 {
        if self.has_failures() && !ignore_failures {
            1
        } else {
            0
        }
    }
}
