//! Run Report Generation
//!
//! Generates reports in multiple formats:
//! - JSON for archiving and tooling
//! - Human-readable for terminal output
//! - Markdown CI summary for the GitHub step summary

use std::path::Path;
use std::time::Duration;

use fwt_domain::constants::REPORT_ERROR_MAX_CHARS;
use fwt_domain::error::Result;
use fwt_domain::{RunSummary, TestResult, TestStatus};
use fwt_infrastructure::ErrorContext;
use serde::Serialize;

use crate::runner::whole_millis;

const STATUS_ORDER: [TestStatus; 4] = [
    TestStatus::Passed,
    TestStatus::Failed,
    TestStatus::TimedOut,
    TestStatus::Skipped,
];

#[derive(Serialize)]
struct JsonReport<'a> {
    passed: bool,
    total: usize,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Generate JSON report
    pub fn to_json(summary: &RunSummary) -> String {
        let report = JsonReport {
            passed: !summary.has_failures(),
            total: summary.counts().total(),
            summary,
        };
        serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
    }

    /// Generate human-readable report
    pub fn to_human_readable(summary: &RunSummary) -> String {
        let mut output = String::new();
        let counts = summary.counts();

        output.push_str("=== Firewall Test Report ===\n\n");
        output.push_str(&format!("Started:   {}\n", summary.started_at().to_rfc3339()));
        output.push_str(&format!("Wall time: {}\n\n", human_duration(summary.wall_time())));

        output.push_str("--- Summary ---\n");
        output.push_str(&format!("Total:     {}\n", counts.total()));
        for status in STATUS_ORDER {
            output.push_str(&format!("  {:<9} {}\n", format!("{status}:"), counts.get(status)));
        }
        output.push('\n');

        output.push_str("--- Tests ---\n");
        for result in summary.results() {
            output.push_str(&format!(
                "{} {} ({})\n",
                result.status().icon(),
                result.name(),
                human_duration(result.duration())
            ));
            if let Some(error) = result.error_message() {
                for line in error.lines() {
                    output.push_str(&format!("    {line}\n"));
                }
            }
            for assertion in result.failed_assertions() {
                output.push_str(&format!("    - {assertion}\n"));
            }
        }
        output.push('\n');

        if summary.has_failures() {
            output.push_str("Result: FAILED\n");
        } else {
            output.push_str("Result: PASSED\n");
        }
        output
    }

    /// Generate the markdown summary shown on the CI job page
    pub fn to_ci_summary(summary: &RunSummary) -> String {
        let mut output = String::new();
        let counts = summary.counts();

        output.push_str("## Firewall Tests\n\n");

        if summary.has_failures() {
            output.push_str("**Status:** :x: FAILED\n\n");
        } else {
            output.push_str("**Status:** :white_check_mark: PASSED\n\n");
        }

        output.push_str("| Status | Count |\n");
        output.push_str("|--------|-------|\n");
        for status in STATUS_ORDER {
            output.push_str(&format!(
                "| {} {status} | {} |\n",
                status.icon(),
                counts.get(status)
            ));
        }
        output.push_str(&format!("| **Total** | **{}** |\n", counts.total()));
        output.push_str(&format!(
            "\nWall time: {}\n\n",
            human_duration(summary.wall_time())
        ));

        if summary.results().is_empty() {
            output.push_str("No tests were run.\n");
            return output;
        }

        output.push_str("| Test | Status | Duration | Error |\n");
        output.push_str("|------|--------|----------|-------|\n");
        for result in summary.results() {
            output.push_str(&format!(
                "| `{}` | {} {} | {} | {} |\n",
                result.name(),
                result.status().icon(),
                result.status(),
                human_duration(result.duration()),
                table_cell(result.error_message().unwrap_or(""))
            ));
        }
        output.push('\n');

        for result in summary.results().iter().filter(|r| has_details(r)) {
            output.push_str(&format!(
                "<details>\n<summary>{} {}</summary>\n\n",
                result.status().icon(),
                result.name()
            ));
            if let Some(error) = result.error_message() {
                output.push_str(&format!("```\n{error}\n```\n\n"));
            }
            for (i, assertion) in result.failed_assertions().iter().enumerate() {
                output.push_str(&format!("{}. {assertion}\n", i + 1));
            }
            output.push_str("\n</details>\n\n");
        }

        output
    }
}

/// Write the JSON report, creating parent directories as needed
pub fn write_json_report(summary: &RunSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
    }
    std::fs::write(path, Reporter::to_json(summary))
        .with_context(|| format!("Failed to write JSON report {}", path.display()))
}

fn has_details(result: &TestResult) -> bool {
    result.status().is_failure() || !result.failed_assertions().is_empty()
}

fn human_duration(duration: Duration) -> String {
    humantime::format_duration(whole_millis(duration)).to_string()
}

/// One-line, pipe-safe, truncated cell content
fn table_cell(text: &str) -> String {
    let single_line = text.lines().next().unwrap_or("");
    let mut cell: String = single_line.chars().take(REPORT_ERROR_MAX_CHARS).collect();
    if single_line.chars().count() > REPORT_ERROR_MAX_CHARS || text.lines().nth(1).is_some() {
        cell.push('…');
    }
    cell.replace('|', "\\|")
}
