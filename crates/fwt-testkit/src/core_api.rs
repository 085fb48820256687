//! Client for the mock core backend
//!
//! Every call except [`CoreApi::create_app`] is authenticated with the
//! per-test token in the `Authorization` header.

use std::path::Path;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Result, TestkitError};
use crate::http::{HttpSession, RetryPolicy};

const APPS_ROUTE: &str = "/api/runtime/apps";
const CONFIG_ROUTE: &str = "/api/runtime/config";
const FIREWALL_LISTS_ROUTE: &str = "/api/runtime/firewall/lists";
const EVENTS_ROUTE: &str = "/api/runtime/app/events";
const MOCK_DOWN_ROUTE: &str = "/mock/down";
const MOCK_UP_ROUTE: &str = "/mock/up";
const MOCK_TIMEOUT_ROUTE: &str = "/mock/timeout";

/// Interval between two polls in [`CoreApi::wait_for_new_events`]
pub const EVENT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Authenticated client for one test application
#[derive(Debug, Clone)]
pub struct CoreApi {
    session: HttpSession,
    base_url: String,
    token: String,
    config_update_delay: Duration,
}

impl CoreApi {
    pub fn new<U: Into<String>, T: Into<String>>(base_url: U, token: T) -> Result<Self> {
        Ok(Self::with_session(
            HttpSession::new(RetryPolicy::default())?,
            base_url,
            token,
        ))
    }

    /// Client sending its requests through `session`
    pub fn with_session<U: Into<String>, T: Into<String>>(
        session: HttpSession,
        base_url: U,
        token: T,
    ) -> Self {
        Self {
            session,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            config_update_delay: Duration::ZERO,
        }
    }

    /// Time to wait after a config push made from a file
    ///
    /// The agent polls core for changes, so drivers wait for the new
    /// configuration to reach it.
    pub fn with_config_update_delay(mut self, delay: Duration) -> Self {
        self.config_update_delay = delay;
        self
    }

    /// Register a new application and return its token
    pub async fn create_app(base_url: &str) -> Result<String> {
        let session = HttpSession::new(RetryPolicy::default())?;
        Self::create_app_with_session(&session, base_url).await
    }

    /// Like [`create_app`](Self::create_app) over an existing session
    pub async fn create_app_with_session(session: &HttpSession, base_url: &str) -> Result<String> {
        let url = format!("{}{APPS_ROUTE}", base_url.trim_end_matches('/'));
        let response = session
            .send(&url, |client| client.post(&url))
            .await?
            .error_for_status()?;
        let body = response.json()?;
        body.get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| TestkitError::Status {
                url,
                status: response.status(),
                body: format!("no token in {body}"),
            })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_runtime_config(&self) -> Result<Value> {
        self.get_json(CONFIG_ROUTE).await
    }

    pub async fn update_runtime_config(&self, config: &Value) -> Result<Value> {
        self.post_json(CONFIG_ROUTE, config).await
    }

    /// Push a runtime config read from a JSON file, then wait the update delay
    pub async fn update_runtime_config_file<P: AsRef<Path>>(&self, path: P) -> Result<Value> {
        let config = read_json_file(path.as_ref())?;
        let applied = self.update_runtime_config(&config).await?;
        self.wait_for_config_update().await;
        Ok(applied)
    }

    pub async fn get_firewall_lists(&self) -> Result<Value> {
        self.get_json(FIREWALL_LISTS_ROUTE).await
    }

    /// Replace the firewall lists (`{"blockedIPAddresses": [...], ...}`)
    pub async fn update_firewall_lists(&self, lists: &Value) -> Result<Value> {
        self.post_json(FIREWALL_LISTS_ROUTE, lists).await
    }

    /// Push firewall lists read from a JSON file, then wait the update delay
    pub async fn update_firewall_lists_file<P: AsRef<Path>>(&self, path: P) -> Result<Value> {
        let lists = read_json_file(path.as_ref())?;
        let applied = self.update_firewall_lists(&lists).await?;
        self.wait_for_config_update().await;
        Ok(applied)
    }

    /// Events reported by the agent, optionally only those of one `type`
    pub async fn get_events(&self, filter_type: Option<&str>) -> Result<Vec<Value>> {
        let events = self.get_json(EVENTS_ROUTE).await?;
        let Value::Array(events) = events else {
            return Err(TestkitError::Status {
                url: format!("{}{EVENTS_ROUTE}", self.base_url),
                status: 200,
                body: format!("expected a list of events, got {events}"),
            });
        };
        Ok(match filter_type {
            Some(kind) => events
                .into_iter()
                .filter(|event| event.get("type").and_then(Value::as_str) == Some(kind))
                .collect(),
            None => events,
        })
    }

    /// Poll until more than `old_len` events exist or `max_wait` elapses
    ///
    /// Returns whether new events arrived.
    pub async fn wait_for_new_events(
        &self,
        max_wait: Duration,
        old_len: usize,
        filter_type: Option<&str>,
    ) -> Result<bool> {
        let started = Instant::now();
        loop {
            let len = self.get_events(filter_type).await?.len();
            if len > old_len {
                debug!(old_len, len, "New events arrived");
                return Ok(true);
            }
            if started.elapsed() >= max_wait {
                debug!(old_len, ?max_wait, "No new events");
                return Ok(false);
            }
            tokio::time::sleep(EVENT_POLL_INTERVAL).await;
        }
    }

    /// Make core answer 503 for this token
    pub async fn set_mock_server_down(&self) -> Result<()> {
        self.post_control(MOCK_DOWN_ROUTE).await
    }

    pub async fn set_mock_server_up(&self) -> Result<()> {
        self.post_control(MOCK_UP_ROUTE).await
    }

    /// Make core hang on requests for this token
    pub async fn set_mock_server_timeout(&self) -> Result<()> {
        self.post_control(MOCK_TIMEOUT_ROUTE).await
    }

    async fn wait_for_config_update(&self) {
        if !self.config_update_delay.is_zero() {
            info!(delay = ?self.config_update_delay, "Waiting for the agent to pick up the new config");
            tokio::time::sleep(self.config_update_delay).await;
        }
    }

    async fn get_json(&self, route: &str) -> Result<Value> {
        let url = format!("{}{route}", self.base_url);
        self.session
            .send(&url, |client| {
                client.get(&url).header("Authorization", &self.token)
            })
            .await?
            .error_for_status()?
            .json()
    }

    async fn post_json(&self, route: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{route}", self.base_url);
        self.session
            .send(&url, |client| {
                client
                    .post(&url)
                    .header("Authorization", &self.token)
                    .json(body)
            })
            .await?
            .error_for_status()?
            .json()
    }

    async fn post_control(&self, route: &str) -> Result<()> {
        let url = format!("{}{route}", self.base_url);
        self.session
            .send(&url, |client| {
                client.post(&url).header("Authorization", &self.token)
            })
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn read_json_file(path: &Path) -> Result<Value> {
    let file_error = |message: String| TestkitError::File {
        path: path.display().to_string(),
        message,
    };
    let content = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| file_error(e.to_string()))
}
