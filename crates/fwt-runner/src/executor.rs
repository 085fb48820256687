//! Single-test execution
//!
//! [`TestExecutor::execute`] takes one test from token to teardown and always
//! returns a [`TestResult`]. Every error on the way becomes that test's
//! failure; nothing escapes to the scheduler.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use fwt_domain::constants::{START_CONFIG_FILE, START_FIREWALL_FILE, TEST_ENV_FILE};
use fwt_domain::error::{Error, Result};
use fwt_domain::{PendingTest, TestOutcome, TestResult, TestType};
use fwt_infrastructure::AppConfig;
use fwt_testkit::DriverArgs;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::allocator::FixtureAllocator;
use crate::backend::CoreBackend;
use crate::crash::detect_crash;
use crate::failures::{collect_fail_markers, extract_error, last_stderr_line};
use crate::fixture::{FixtureProvider, FixtureSpec};
use crate::process::{EntryPoint, ProcessOutcome, run_test_process};

/// Environment variable that lets drivers import helpers from the tests root
const DRIVER_PATH_ENV: &str = "PYTHONPATH";

/// Per-run settings shared by every test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorSettings {
    pub tests_dir: PathBuf,
    pub test_type: TestType,
    pub image: String,
    pub app_port: u16,
    pub start_port: u16,
    pub control_server_port: u16,
    pub control_start_port: u16,
    pub token_env_var: String,
    pub extra_args: Vec<String>,
    pub sleep_before_test: Duration,
    pub config_update_delay: u64,
    pub core_port: u16,
    pub entry_program: String,
    pub entry_script: String,
}

impl ExecutorSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let tests_dir = config
            .runner
            .tests_dir
            .canonicalize()
            .unwrap_or_else(|_| config.runner.tests_dir.clone());
        Self {
            tests_dir,
            test_type: config.runner.test_type,
            image: config.docker.image.clone(),
            app_port: config.docker.app_port,
            start_port: config.docker.start_port,
            control_server_port: config.docker.control_server_port,
            control_start_port: config.docker.control_start_port,
            token_env_var: config.docker.token_env_var.clone(),
            extra_args: config.docker.extra_args.clone(),
            sleep_before_test: config.runner.sleep_before_test(),
            config_update_delay: config.runner.config_update_delay,
            core_port: config.core.port,
            entry_program: config.entry.program.clone(),
            entry_script: config.entry.script.clone(),
        }
    }

    /// Entry point launched from each test directory
    pub fn entry_point(&self) -> EntryPoint {
        EntryPoint::new(&self.entry_program)
            .with_arg(&self.entry_script)
            .with_env(DRIVER_PATH_ENV, self.tests_dir.display().to_string())
    }

    fn allocator(&self) -> FixtureAllocator {
        let control_start = self
            .test_type
            .uses_control_server()
            .then_some(self.control_start_port);
        FixtureAllocator::new(self.start_port, control_start)
    }
}

/// Runs one test against a dedicated fixture
pub struct TestExecutor {
    settings: ExecutorSettings,
    fixtures: Arc<dyn FixtureProvider>,
    core: Arc<dyn CoreBackend>,
    entry: EntryPoint,
    allocator: FixtureAllocator,
}

impl TestExecutor {
    pub fn new(
        settings: ExecutorSettings,
        fixtures: Arc<dyn FixtureProvider>,
        core: Arc<dyn CoreBackend>,
    ) -> Self {
        let entry = settings.entry_point();
        let allocator = settings.allocator();
        Self {
            settings,
            fixtures,
            core,
            entry,
            allocator,
        }
    }

    /// Replace the entry point derived from the settings
    pub fn with_entry_point(mut self, entry: EntryPoint) -> Self {
        self.entry = entry;
        self
    }

    pub fn settings(&self) -> &ExecutorSettings {
        &self.settings
    }

    /// Run `test_id` and produce its result
    pub async fn execute(&self, test_id: &str, timeout: Duration) -> TestResult {
        let pending = PendingTest::start(test_id);
        let test_dir = self.settings.tests_dir.join(test_id);
        info!(test = %test_id, "Starting test");

        let token = match self.core.issue_token().await {
            Ok(token) => token,
            Err(e) => return pending.complete(TestOutcome::failed(e.to_string())),
        };

        if let Err(e) = self.apply_start_files(test_id, &test_dir, &token).await {
            return pending.complete(TestOutcome::failed(e.to_string()));
        }

        let spec = match self.fixture_spec(test_id, &test_dir, &token) {
            Ok(spec) => spec,
            Err(e) => return pending.complete(TestOutcome::failed(e.to_string())),
        };

        let outcome = self.run_with_fixture(&spec, &test_dir, token, timeout).await;
        let outcome = self.teardown(&spec, outcome).await;
        info!(test = %test_id, status = %outcome.status, "Test finished");
        pending.complete(outcome)
    }

    async fn run_with_fixture(
        &self,
        spec: &FixtureSpec,
        test_dir: &Path,
        token: String,
        timeout: Duration,
    ) -> TestOutcome {
        if let Err(e) = self.fixtures.start(spec).await {
            return TestOutcome::failed(e.to_string());
        }

        if !self.settings.sleep_before_test.is_zero() {
            debug!(test = %spec.test_id, delay = ?self.settings.sleep_before_test, "Waiting for fixture");
            tokio::time::sleep(self.settings.sleep_before_test).await;
        }

        let args = DriverArgs {
            server_port: spec.host_port,
            token,
            core_port: self.settings.core_port,
            config_update_delay: self.settings.config_update_delay,
            control_server_port: spec.control_ports.map(|(host, _)| host),
        };
        match run_test_process(&self.entry, test_dir, &args.to_cli_args(), timeout).await {
            Ok(process) => classify(&spec.test_id, &process, timeout),
            Err(e) => TestOutcome::failed(
                Error::process_launch(&spec.test_id, e.to_string()).to_string(),
            ),
        }
    }

    /// Push `start_config.json` and `start_firewall.json` when present
    async fn apply_start_files(&self, test_id: &str, test_dir: &Path, token: &str) -> Result<()> {
        if let Some(config) = read_start_file(test_id, &test_dir.join(START_CONFIG_FILE)).await? {
            self.core
                .apply_runtime_config(token, &config)
                .await
                .map_err(|e| Error::config_apply(test_id, e.to_string()))?;
            debug!(test = %test_id, "Applied start config");
        }
        if let Some(lists) = read_start_file(test_id, &test_dir.join(START_FIREWALL_FILE)).await? {
            self.core
                .apply_firewall_lists(token, &lists)
                .await
                .map_err(|e| Error::config_apply(test_id, e.to_string()))?;
            debug!(test = %test_id, "Applied start firewall lists");
        }
        Ok(())
    }

    fn fixture_spec(&self, test_id: &str, test_dir: &Path, token: &str) -> Result<FixtureSpec> {
        let slot = self.allocator.allocate(test_id)?;
        let env_file = test_dir.join(TEST_ENV_FILE);
        Ok(FixtureSpec {
            test_id: test_id.to_string(),
            container_name: slot.container_name,
            image: self.settings.image.clone(),
            host_port: slot.app_port,
            app_port: self.settings.app_port,
            control_ports: slot
                .control_port
                .map(|host| (host, self.settings.control_server_port)),
            env_file: env_file.is_file().then_some(env_file),
            token_env: (self.settings.token_env_var.clone(), token.to_string()),
            extra_args: self.settings.extra_args.clone(),
        })
    }

    /// Crash scan and container removal; errors are logged only
    async fn teardown(&self, spec: &FixtureSpec, outcome: TestOutcome) -> TestOutcome {
        let outcome = match self.fixtures.logs(spec).await {
            Ok(logs) => match detect_crash(&logs) {
                Some(crash) => {
                    warn!(test = %spec.test_id, marker = crash.marker, line = %crash.line, "Crash detected");
                    let reason = Error::CrashDetected {
                        test: spec.test_id.clone(),
                        marker: crash.marker.to_string(),
                    };
                    outcome.force_failed(reason.to_string())
                }
                None => outcome,
            },
            Err(e) => {
                warn!(test = %spec.test_id, error = %e, "Failed to fetch fixture logs");
                outcome
            }
        };

        if let Err(e) = self.fixtures.stop(spec).await {
            warn!(test = %spec.test_id, error = %e, "Failed to remove fixture");
        }
        outcome
    }
}

async fn read_start_file(test_id: &str, path: &Path) -> Result<Option<Value>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::config_apply(test_id, format!("{}: {e}", path.display())))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| Error::config_apply(test_id, format!("{}: {e}", path.display())))?;
    Ok(Some(value))
}

/// Turn a finished test process into an outcome
pub fn classify(test_id: &str, process: &ProcessOutcome, timeout: Duration) -> TestOutcome {
    if process.timed_out {
        let error = Error::TestTimeout {
            test: test_id.to_string(),
            timeout,
        };
        return TestOutcome::timed_out(error.to_string());
    }
    if process.exit_code == Some(0) {
        return TestOutcome::passed();
    }

    let assertions = collect_fail_markers(&process.stdout, &process.stderr);
    if !assertions.is_empty() {
        return TestOutcome::failed(format!("{} assertion(s) failed", assertions.len()))
            .with_assertions(assertions);
    }

    let message = extract_error(&process.stderr)
        .or_else(|| last_stderr_line(&process.stderr))
        .unwrap_or_else(|| match process.exit_code {
            Some(code) => format!("Test process exited with code {code}"),
            None => "Test process was terminated by a signal".to_string(),
        });
    TestOutcome::failed(message)
}
