//! Client for the application under test

use serde_json::Value;

use crate::error::Result;
use crate::http::{HttpSession, RetryPolicy};
use crate::response::TestResponse;

/// Sends requests to the fixture application
#[derive(Debug, Clone)]
pub struct AppClient {
    session: HttpSession,
    base_url: String,
}

impl AppClient {
    pub fn new<S: Into<String>>(base_url: S, policy: RetryPolicy) -> Result<Self> {
        Ok(Self {
            session: HttpSession::new(policy)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Client for `http://localhost:<port>`
    pub fn localhost(port: u16) -> Result<Self> {
        Self::new(format!("http://localhost:{port}"), RetryPolicy::default())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}{route}", self.base_url)
    }

    pub async fn get(&self, route: &str) -> Result<TestResponse> {
        self.get_with_headers(route, &[]).await
    }

    pub async fn get_with_headers(
        &self,
        route: &str,
        headers: &[(&str, &str)],
    ) -> Result<TestResponse> {
        let url = self.url(route);
        self.session
            .send(&url, |client| {
                headers
                    .iter()
                    .fold(client.get(&url), |req, (name, value)| req.header(*name, *value))
            })
            .await
    }

    /// GET without connection retries
    pub async fn get_raw(&self, route: &str, headers: &[(&str, &str)]) -> Result<TestResponse> {
        let url = self.url(route);
        self.session
            .send_with_policy(&url, RetryPolicy::none(), |client| {
                headers
                    .iter()
                    .fold(client.get(&url), |req, (name, value)| req.header(*name, *value))
            })
            .await
    }

    /// POST `body` as JSON
    pub async fn post(&self, route: &str, body: &Value) -> Result<TestResponse> {
        self.post_with_headers(route, body, &[]).await
    }

    pub async fn post_with_headers(
        &self,
        route: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> Result<TestResponse> {
        let url = self.url(route);
        self.session
            .send(&url, |client| {
                headers
                    .iter()
                    .fold(client.post(&url).json(body), |req, (name, value)| {
                        req.header(*name, *value)
                    })
            })
            .await
    }
}
