//! Core backend port used by the runner before each fixture starts

use std::time::Duration;

use async_trait::async_trait;
use fwt_domain::error::Result;
use fwt_infrastructure::ErrorContext;
use fwt_testkit::{CoreApi, HttpSession, RetryPolicy};
use serde_json::Value;

/// The calls the runner makes to core
#[async_trait]
pub trait CoreBackend: Send + Sync {
    /// Register a new application and return its token
    async fn issue_token(&self) -> Result<String>;

    async fn apply_runtime_config(&self, token: &str, config: &Value) -> Result<()>;

    async fn apply_firewall_lists(&self, token: &str, lists: &Value) -> Result<()>;
}

/// [`CoreBackend`] over the mock core's HTTP API
///
/// Every request is bounded by `request_timeout`, so a hung core fails the
/// test instead of holding its slot forever.
#[derive(Debug, Clone)]
pub struct HttpCoreBackend {
    base_url: String,
    session: HttpSession,
}

impl HttpCoreBackend {
    pub fn new<S: Into<String>>(base_url: S, request_timeout: Duration) -> Result<Self> {
        let session = HttpSession::with_timeout(RetryPolicy::default(), request_timeout)
            .network_context("Failed to create core client")?;
        Ok(Self {
            base_url: base_url.into(),
            session,
        })
    }

    fn client(&self, token: &str) -> CoreApi {
        CoreApi::with_session(self.session.clone(), &self.base_url, token)
    }
}

#[async_trait]
impl CoreBackend for HttpCoreBackend {
    async fn issue_token(&self) -> Result<String> {
        CoreApi::create_app_with_session(&self.session, &self.base_url)
            .await
            .network_context("Core did not issue a token")
    }

    async fn apply_runtime_config(&self, token: &str, config: &Value) -> Result<()> {
        self.client(token)
            .update_runtime_config(config)
            .await
            .network_context("Failed to update runtime config")?;
        Ok(())
    }

    async fn apply_firewall_lists(&self, token: &str, lists: &Value) -> Result<()> {
        self.client(token)
            .update_firewall_lists(lists)
            .await
            .network_context("Failed to update firewall lists")?;
        Ok(())
    }
}
