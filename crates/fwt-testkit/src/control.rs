//! Client for the fixture's control server
//!
//! Control tests start, stop and restart the application, and install or
//! remove the agent, through a sidecar HTTP API inside the container.

use serde_json::{Value, json};
use tracing::debug;

use crate::error::{Result, TestkitError};
use crate::http::{HttpSession, RetryPolicy};
use crate::response::TestResponse;

/// Sidecar control API of one fixture
#[derive(Debug, Clone)]
pub struct ControlServer {
    session: HttpSession,
    base_url: String,
}

impl ControlServer {
    pub fn new<S: Into<String>>(base_url: S, policy: RetryPolicy) -> Result<Self> {
        Ok(Self {
            session: HttpSession::new(policy)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn localhost(port: u16) -> Result<Self> {
        Self::new(format!("http://localhost:{port}"), RetryPolicy::default())
    }

    pub async fn health(&self) -> Result<TestResponse> {
        self.get("/health").await
    }

    /// Fail unless `/health` answers 200
    pub async fn check_health(&self) -> Result<()> {
        self.health().await?.error_for_status()?;
        Ok(())
    }

    pub async fn status(&self) -> Result<TestResponse> {
        self.get("/status").await
    }

    /// Fail unless the application's running state is `expected`
    pub async fn status_is_running(&self, expected: bool) -> Result<()> {
        let response = self.status().await?.error_for_status()?;
        let running = parse_running(&response);
        if running == expected {
            return Ok(());
        }
        Err(TestkitError::Status {
            url: response.url().to_string(),
            status: response.status(),
            body: format!(
                "expected running={expected}, got running={running}: {}",
                response.text()
            ),
        })
    }

    pub async fn start_server(&self) -> Result<TestResponse> {
        self.post("/start_server", None).await
    }

    pub async fn stop_server(&self) -> Result<TestResponse> {
        self.post("/stop_server", None).await
    }

    pub async fn restart(&self) -> Result<TestResponse> {
        self.post("/restart", None).await
    }

    pub async fn graceful_restart(&self) -> Result<TestResponse> {
        self.post("/graceful-restart", None).await
    }

    pub async fn graceful_stop(&self) -> Result<TestResponse> {
        self.post("/graceful-stop", None).await
    }

    /// Application logs, or the error text when they cannot be fetched
    ///
    /// Meant for failure messages, so it never fails itself.
    pub async fn get_server_logs(&self) -> String {
        match self.get("/get-server-logs").await {
            Ok(response) => response.text().to_string(),
            Err(e) => format!("<server logs unavailable: {e}>"),
        }
    }

    pub async fn install_aikido(&self) -> Result<TestResponse> {
        self.post("/install-aikido", None).await
    }

    pub async fn uninstall_aikido(&self) -> Result<TestResponse> {
        self.post("/uninstall-aikido", None).await
    }

    pub async fn install_aikido_version(&self, version: &str) -> Result<TestResponse> {
        self.post("/install-aikido-version", Some(json!({ "version": version })))
            .await
    }

    pub async fn config_test(&self) -> Result<TestResponse> {
        self.get("/config-test").await
    }

    async fn get(&self, route: &str) -> Result<TestResponse> {
        let url = format!("{}{route}", self.base_url);
        debug!(url = %url, "Control server GET");
        self.session.send(&url, |client| client.get(&url)).await
    }

    async fn post(&self, route: &str, body: Option<Value>) -> Result<TestResponse> {
        let url = format!("{}{route}", self.base_url);
        debug!(url = %url, "Control server POST");
        self.session
            .send(&url, |client| match &body {
                Some(body) => client.post(&url).json(body),
                None => client.post(&url),
            })
            .await
    }
}

/// `{"running": true}` when the body is such an object, otherwise whether
/// the body mentions `running`
fn parse_running(response: &TestResponse) -> bool {
    match response.json() {
        Ok(Value::Object(map)) if map.get("running").is_some_and(Value::is_boolean) => {
            map.get("running").and_then(Value::as_bool).unwrap_or(false)
        }
        _ => {
            let text = response.text().to_ascii_lowercase();
            text.contains("running") && !text.contains("not running")
        }
    }
}
