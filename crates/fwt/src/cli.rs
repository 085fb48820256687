//! Command line interface
//!
//! Every flag overrides the value loaded from the configuration file and the
//! `FWT_*` environment.

use std::path::PathBuf;

use clap::Parser;
use fwt_domain::TestType;
use fwt_infrastructure::{AppConfig, LogFormat};
use fwt_runner::parse_test_list;

/// Command line interface for the firewall tester
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fwt")]
#[command(about = "Firewall Tester - end-to-end tests for in-app firewalls")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Dockerfile of the application under test
    #[arg(long)]
    pub dockerfile_path: Option<PathBuf>,

    /// Directory holding the test directories
    #[arg(long)]
    pub tests_dir: Option<PathBuf>,

    /// Kind of tests to run
    #[arg(long)]
    pub test_type: Option<TestType>,

    /// Maximum number of tests running at once
    #[arg(long)]
    pub max_parallel_tests: Option<usize>,

    /// Seconds drivers wait after pushing configuration to core
    #[arg(long)]
    pub config_update_delay: Option<u64>,

    /// Tests to skip, separated by commas or spaces
    #[arg(long)]
    pub skip_tests: Option<String>,

    /// Only run these tests, separated by commas or spaces
    #[arg(long)]
    pub run_tests: Option<String>,

    /// Per-test timeout in seconds
    #[arg(long)]
    pub test_timeout: Option<u64>,

    /// Extra `docker run` arguments
    #[arg(long, allow_hyphen_values = true)]
    pub extra_args: Option<String>,

    /// Extra `docker build` arguments
    #[arg(long, allow_hyphen_values = true)]
    pub extra_build_args: Option<String>,

    /// Port the application listens on inside the container
    #[arg(long)]
    pub app_port: Option<u16>,

    /// Seconds to wait for the fixture before starting the test
    #[arg(long)]
    pub sleep_before_test: Option<u64>,

    /// Exit successfully even when tests fail
    #[arg(long)]
    pub ignore_failures: bool,

    /// Write a JSON report to this path
    #[arg(long)]
    pub json_report: Option<PathBuf>,

    /// Log output format
    #[arg(long, value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Layer the flags that were given on top of `config`
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(path) = &self.dockerfile_path {
            config.docker.dockerfile_path = Some(path.clone());
        }
        if let Some(dir) = &self.tests_dir {
            config.runner.tests_dir = dir.clone();
        }
        if let Some(test_type) = self.test_type {
            config.runner.test_type = test_type;
        }
        if let Some(n) = self.max_parallel_tests {
            config.runner.max_parallel_tests = n;
        }
        if let Some(delay) = self.config_update_delay {
            config.runner.config_update_delay = delay;
        }
        if let Some(skip) = &self.skip_tests {
            config.runner.skip_tests = parse_test_list(skip);
        }
        if let Some(run) = &self.run_tests {
            config.runner.run_tests = parse_test_list(run);
        }
        if let Some(timeout) = self.test_timeout {
            config.runner.test_timeout = timeout;
        }
        if let Some(args) = &self.extra_args {
            config.docker.extra_args = split_args(args);
        }
        if let Some(args) = &self.extra_build_args {
            config.docker.extra_build_args = split_args(args);
        }
        if let Some(port) = self.app_port {
            config.docker.app_port = port;
        }
        if let Some(sleep) = self.sleep_before_test {
            config.runner.sleep_before_test = sleep;
        }
        if self.ignore_failures {
            config.runner.ignore_failures = true;
        }
        if let Some(path) = &self.json_report {
            config.runner.json_report = Some(path.clone());
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
    }
}

fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn parse_log_format(raw: &str) -> Result<LogFormat, String> {
    match raw.trim().to_lowercase().as_str() {
        "plain" => Ok(LogFormat::Plain),
        "json" => Ok(LogFormat::Json),
        "github" => Ok(LogFormat::Github),
        other => Err(format!(
            "Invalid log format: {other}. Use 'plain', 'json' or 'github'"
        )),
    }
}
