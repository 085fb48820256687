//! Where the markdown run summary goes
//!
//! On GitHub Actions the summary is appended to the file named by
//! `GITHUB_STEP_SUMMARY`; everywhere else it is printed to the console.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use fwt_domain::error::Result;
use fwt_infrastructure::ErrorContext;
use tracing::{info, warn};

/// Environment variable naming the step summary file
pub const STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

/// Destination of the run summary
pub trait SummarySink: Send + Sync {
    fn name(&self) -> &str;

    fn publish(&self, markdown: &str) -> Result<()>;
}

/// Appends to the GitHub Actions step summary file
#[derive(Debug, Clone)]
pub struct GithubStepSummary {
    path: PathBuf,
}

impl GithubStepSummary {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Sink for the current job, if running on GitHub Actions
    pub fn from_env() -> Option<Self> {
        std::env::var_os(STEP_SUMMARY_ENV)
            .filter(|value| !value.is_empty())
            .map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SummarySink for GithubStepSummary {
    fn name(&self) -> &str {
        "github-step-summary"
    }

    fn publish(&self, markdown: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open step summary {}", self.path.display()))?;
        writeln!(file, "{markdown}")
            .with_context(|| format!("Failed to write step summary {}", self.path.display()))
    }
}

/// Prints the summary on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl SummarySink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn publish(&self, markdown: &str) -> Result<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{markdown}").io_context("Failed to print summary")
    }
}

/// The step summary when available, the console otherwise
pub fn detect_sink() -> Box<dyn SummarySink> {
    match GithubStepSummary::from_env() {
        Some(sink) => Box::new(sink),
        None => Box::new(ConsoleSink),
    }
}

/// Publish `markdown`, falling back to the console if the sink fails
pub fn publish_summary(sink: &dyn SummarySink, markdown: &str) {
    match sink.publish(markdown) {
        Ok(()) => info!(sink = sink.name(), "Published run summary"),
        Err(e) => {
            warn!(sink = sink.name(), error = %e, "Failed to publish run summary, printing it instead");
            if let Err(e) = ConsoleSink.publish(markdown) {
                warn!(error = %e, "Failed to print run summary");
            }
        }
    }
}
