//! Bounded parallel scheduling
//!
//! Each selected test is a tokio task holding one semaphore permit while it
//! runs. Results come back in completion order and are sorted by name when
//! the summary is built.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use fwt_domain::{PendingTest, RunSummary, TestOutcome, TestResult};
use tokio::sync::Semaphore;
use tracing::{error, info};

use crate::discovery::select_tests;
use crate::executor::TestExecutor;

/// Knobs of one `run_all` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum number of tests running at once
    pub concurrency: usize,
    pub per_test_timeout: Duration,
    /// Reported as skipped without launching a fixture
    pub skip: HashSet<String>,
    /// When non-empty, only these tests run
    pub include: HashSet<String>,
}

impl RunOptions {
    pub fn new(concurrency: usize, per_test_timeout: Duration) -> Self {
        Self {
            concurrency,
            per_test_timeout,
            skip: HashSet::new(),
            include: HashSet::new(),
        }
    }

    pub fn with_skip<I: IntoIterator<Item = String>>(mut self, skip: I) -> Self {
        self.skip.extend(skip);
        self
    }

    pub fn with_include<I: IntoIterator<Item = String>>(mut self, include: I) -> Self {
        self.include.extend(include);
        self
    }
}

pub struct TestRunner {
    executor: Arc<TestExecutor>,
}

impl TestRunner {
    pub fn new(executor: Arc<TestExecutor>) -> Self {
        Self { executor }
    }

    /// Run the selected tests and aggregate their results
    pub async fn run_all(&self, test_ids: &[String], options: &RunOptions) -> RunSummary {
        let started_at = Utc::now();
        let started = Instant::now();
        let selection = select_tests(test_ids, &options.skip, &options.include);
        let concurrency = options.concurrency.max(1);
        info!(
            run = selection.run.len(),
            skipped = selection.skipped.len(),
            concurrency,
            "Running tests"
        );

        let mut results: Vec<TestResult> = selection
            .skipped
            .iter()
            .map(|id| {
                info!(test = %id, "Skipping test");
                TestResult::skipped(id.as_str())
            })
            .collect();

        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut tasks = FuturesUnordered::new();
        for test_id in selection.run {
            let semaphore = Arc::clone(&semaphore);
            let executor = Arc::clone(&self.executor);
            let timeout = options.per_test_timeout;
            tasks.push(async move {
                let id = test_id.clone();
                let handle = tokio::spawn(async move {
                    let pending_id = test_id.clone();
                    match semaphore.acquire_owned().await {
                        Ok(_permit) => executor.execute(&test_id, timeout).await,
                        Err(e) => PendingTest::start(pending_id)
                            .complete(TestOutcome::failed(format!("Scheduler closed: {e}"))),
                    }
                });
                match handle.await {
                    Ok(result) => result,
                    Err(e) => {
                        error!(test = %id, error = %e, "Test task aborted");
                        PendingTest::start(id).complete(TestOutcome::failed(format!(
                            "Test task aborted: {e}"
                        )))
                    }
                }
            });
        }

        let total = tasks.len();
        while let Some(result) = tasks.next().await {
            info!(
                test = %result.name(),
                status = %result.status(),
                duration = %humantime::format_duration(whole_millis(result.duration())),
                done = results.len() + 1 - selection.skipped.len(),
                total,
                "Test completed"
            );
            results.push(result);
        }

        RunSummary::from_results(results, started_at, started.elapsed())
    }
}

/// Drop sub-millisecond noise from durations shown to people
pub(crate) fn whole_millis(duration: Duration) -> Duration {
    Duration::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
}
