use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final classification of a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    TimedOut,
}

impl TestStatus {
    /// True for statuses that make the run fail
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::TimedOut)
    }

    /// Emoji used in the markdown report
    pub fn icon(self) -> &'static str {
        match self {
            Self::Passed => "✅",
            Self::Failed => "❌",
            Self::Skipped => "⏭️",
            Self::TimedOut => "⏱️",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
            Self::TimedOut => write!(f, "timed_out"),
        }
    }
}

/// What happened to a test, before timestamps are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub status: TestStatus,
    pub error_message: Option<String>,
    pub failed_assertions: Vec<String>,
}

impl TestOutcome {
    pub fn passed() -> Self {
        Self {
            status: TestStatus::Passed,
            error_message: None,
            failed_assertions: Vec::new(),
        }
    }

    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self {
            status: TestStatus::Failed,
            error_message: Some(message.into()),
            failed_assertions: Vec::new(),
        }
    }

    pub fn timed_out<S: Into<String>>(message: S) -> Self {
        Self {
            status: TestStatus::TimedOut,
            error_message: Some(message.into()),
            failed_assertions: Vec::new(),
        }
    }

    pub fn skipped() -> Self {
        Self {
            status: TestStatus::Skipped,
            error_message: None,
            failed_assertions: Vec::new(),
        }
    }

    /// Attach the soft-assertion failures extracted from the test output
    pub fn with_assertions(mut self, failed_assertions: Vec<String>) -> Self {
        self.failed_assertions = failed_assertions;
        self
    }

    /// Force the outcome to `failed`, keeping any collected assertions.
    ///
    /// The new reason is prepended to an existing error message.
    pub fn force_failed<S: Into<String>>(mut self, reason: S) -> Self {
        let reason = reason.into();
        self.error_message = Some(match self.error_message.take() {
            Some(previous) => format!("{reason}\n{previous}"),
            None => reason,
        });
        self.status = TestStatus::Failed;
        self
    }
}

/// A test that has started and is waiting for its outcome.
///
/// `complete` consumes the pending test, so every test produces exactly one
/// [`TestResult`].
#[derive(Debug)]
pub struct PendingTest {
    name: String,
    start_time: DateTime<Utc>,
    started: Instant,
}

impl PendingTest {
    pub fn start<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            start_time: Utc::now(),
            started: Instant::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn complete(self, outcome: TestOutcome) -> TestResult {
        let duration = self.started.elapsed();
        let end_time = self.start_time
            + chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::zero());
        TestResult {
            name: self.name,
            status: outcome.status,
            start_time: self.start_time,
            end_time,
            duration,
            error_message: outcome.error_message,
            failed_assertions: outcome.failed_assertions,
        }
    }
}

/// Immutable outcome of one test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    name: String,
    status: TestStatus,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    duration: Duration,
    error_message: Option<String>,
    #[serde(default)]
    failed_assertions: Vec<String>,
}

impl TestResult {
    /// Result for a test that was skipped without launching a fixture
    pub fn skipped<S: Into<String>>(name: S) -> Self {
        PendingTest::start(name).complete(TestOutcome::skipped())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn failed_assertions(&self) -> &[String] {
        &self.failed_assertions
    }
}
