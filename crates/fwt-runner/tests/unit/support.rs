//! Fakes shared by the executor and runner tests

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fwt_domain::TestType;
use fwt_domain::error::{Error, Result};
use fwt_runner::{CoreBackend, EntryPoint, ExecutorSettings, FixtureProvider, FixtureSpec};
use serde_json::Value;

/// Records fixture lifecycle calls and the peak number of live fixtures
#[derive(Default)]
pub struct FakeFixtures {
    pub started: Mutex<Vec<FixtureSpec>>,
    pub stopped: Mutex<Vec<String>>,
    pub logs: Mutex<HashMap<String, String>>,
    pub fail_start: Mutex<Vec<String>>,
    live: AtomicUsize,
    peak: AtomicUsize,
}

impl FakeFixtures {
    pub fn with_logs(self, test_id: &str, logs: &str) -> Self {
        self.logs
            .lock()
            .unwrap()
            .insert(test_id.to_string(), logs.to_string());
        self
    }

    pub fn failing_start(self, test_id: &str) -> Self {
        self.fail_start.lock().unwrap().push(test_id.to_string());
        self
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn stopped(&self) -> Vec<String> {
        self.stopped.lock().unwrap().clone()
    }

    pub fn started(&self) -> Vec<FixtureSpec> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl FixtureProvider for FakeFixtures {
    async fn start(&self, spec: &FixtureSpec) -> Result<()> {
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(live, Ordering::SeqCst);
        self.started.lock().unwrap().push(spec.clone());
        if self.fail_start.lock().unwrap().contains(&spec.test_id) {
            return Err(Error::fixture_start(&spec.test_id, "port is already allocated"));
        }
        Ok(())
    }

    async fn logs(&self, spec: &FixtureSpec) -> Result<String> {
        Ok(self
            .logs
            .lock()
            .unwrap()
            .get(&spec.test_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn stop(&self, spec: &FixtureSpec) -> Result<()> {
        self.live.fetch_sub(1, Ordering::SeqCst);
        self.stopped.lock().unwrap().push(spec.test_id.clone());
        Ok(())
    }
}

/// Issues sequential tokens; rejects configs containing `"reject": true`
#[derive(Default)]
pub struct FakeCore {
    issued: AtomicUsize,
    pub applied: Mutex<Vec<(String, Value)>>,
    pub offline: bool,
}

impl FakeCore {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl CoreBackend for FakeCore {
    async fn issue_token(&self) -> Result<String> {
        if self.offline {
            return Err(Error::network("Core did not issue a token: connection refused"));
        }
        let n = self.issued.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token-{n}"))
    }

    async fn apply_runtime_config(&self, token: &str, config: &Value) -> Result<()> {
        if config["reject"] == Value::Bool(true) {
            return Err(Error::network("Failed to update runtime config: 500"));
        }
        self.applied
            .lock()
            .unwrap()
            .push((token.to_string(), config.clone()));
        Ok(())
    }

    async fn apply_firewall_lists(&self, token: &str, lists: &Value) -> Result<()> {
        self.applied
            .lock()
            .unwrap()
            .push((token.to_string(), lists.clone()));
        Ok(())
    }
}

/// Create `<root>/<test_id>/test.sh` with `script`
pub fn write_test(root: &Path, test_id: &str, script: &str) {
    let dir = root.join(test_id);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("test.sh"), script).unwrap();
}

pub fn settings(root: &Path, test_type: TestType) -> ExecutorSettings {
    ExecutorSettings {
        tests_dir: root.to_path_buf(),
        test_type,
        image: "fwt-app:test".to_string(),
        app_port: 3000,
        start_port: 3001,
        control_server_port: 8081,
        control_start_port: 8100,
        token_env_var: "AIKIDO_TOKEN".to_string(),
        extra_args: vec!["--network=host".to_string()],
        sleep_before_test: Duration::ZERO,
        config_update_delay: 0,
        core_port: 3000,
        entry_program: "sh".to_string(),
        entry_script: "test.sh".to_string(),
    }
}

pub fn sh_entry() -> EntryPoint {
    EntryPoint::new("sh").with_arg("test.sh")
}
