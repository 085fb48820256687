//! Core backend configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Location of the mock core backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoreConfig {
    pub host: String,
    pub port: u16,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl CoreConfig {
    /// Base URL, e.g. `http://localhost:3000`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CORE_HOST.to_string(),
            port: DEFAULT_CORE_PORT,
            request_timeout: DEFAULT_CORE_REQUEST_TIMEOUT_SECS,
        }
    }
}
