//! HTTP session with connection retries
//!
//! Fixtures need a few seconds before they accept connections, so requests
//! that fail to connect are retried with exponential backoff. Any other
//! failure, and every HTTP response whatever its status, is returned as is.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::debug;

use crate::error::{Result, TestkitError};
use crate::response::TestResponse;

/// Default number of connection retries
pub const DEFAULT_CONNECT_RETRIES: u32 = 10;

/// Default backoff factor
pub const DEFAULT_BACKOFF_FACTOR: Duration = Duration::from_secs(1);

/// Upper bound of a single backoff sleep
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Retry behavior for connection failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub connect_retries: u32,
    pub backoff_factor: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            connect_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_connect_retries(mut self, retries: u32) -> Self {
        self.connect_retries = retries;
        self
    }

    pub fn with_backoff_factor(mut self, factor: Duration) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// Sleep before retry number `retry` (1-based)
    ///
    /// The first retry is immediate, then `factor * 2^(retry - 1)`, capped.
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exponent = (retry - 1).min(16);
        self.backoff_factor
            .saturating_mul(1 << exponent)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            connect_retries: DEFAULT_CONNECT_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

/// A `reqwest::Client` plus the retry policy applied to every request
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    policy: RetryPolicy,
}

impl HttpSession {
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        let client = Client::builder().build().map_err(TestkitError::Client)?;
        Ok(Self { client, policy })
    }

    /// Session with a per-request timeout
    pub fn with_timeout(policy: RetryPolicy, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TestkitError::Client)?;
        Ok(Self { client, policy })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Send the request produced by `build`, retrying connection failures
    ///
    /// `build` is called once per attempt since a `RequestBuilder` cannot be
    /// reused after sending.
    pub async fn send<F>(&self, url: &str, build: F) -> Result<TestResponse>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        self.send_with_policy(url, self.policy, build).await
    }

    /// Like [`send`](Self::send) with a one-off retry policy
    pub async fn send_with_policy<F>(
        &self,
        url: &str,
        policy: RetryPolicy,
        build: F,
    ) -> Result<TestResponse>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut retry = 0;
        loop {
            match build(&self.client).send().await {
                Ok(response) => return TestResponse::read(url, response).await,
                Err(e) if e.is_connect() && retry < policy.connect_retries => {
                    retry += 1;
                    let delay = policy.backoff(retry);
                    debug!(url, retry, delay = ?delay, error = %e, "Connection failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(TestkitError::Request {
                        url: url.to_string(),
                        source: e,
                    });
                }
            }
        }
    }
}
