//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{CoreConfig, DockerConfig, EntryPointConfig, LoggingConfig, RunnerConfig};

/// Complete configuration of a test run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Test selection, parallelism and timing
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Fixture image and container settings
    #[serde(default)]
    pub docker: DockerConfig,

    /// Mock core backend
    #[serde(default)]
    pub core: CoreConfig,

    /// How a test entry point is launched
    #[serde(default)]
    pub entry: EntryPointConfig,

    /// Logging
    #[serde(default)]
    pub logging: LoggingConfig,
}
