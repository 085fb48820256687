//! Docker configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Fixture image and container settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DockerConfig {
    /// Docker executable
    pub binary: String,

    /// Tag of the image built before the run
    pub image: String,

    /// Dockerfile of the application under test; no build when unset
    pub dockerfile_path: Option<PathBuf>,

    /// Extra `docker run` arguments, appended before the image name
    pub extra_args: Vec<String>,

    /// Extra `docker build` arguments
    pub extra_build_args: Vec<String>,

    /// Port the application listens on inside the container
    pub app_port: u16,

    /// First host port for application containers
    pub start_port: u16,

    /// Port of the control server inside the container
    pub control_server_port: u16,

    /// First host port for control servers
    pub control_start_port: u16,

    /// Container env var carrying the per-test token
    pub token_env_var: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_DOCKER_BINARY.to_string(),
            image: DEFAULT_IMAGE_NAME.to_string(),
            dockerfile_path: None,
            extra_args: Vec::new(),
            extra_build_args: Vec::new(),
            app_port: DEFAULT_APP_PORT,
            start_port: DEFAULT_START_PORT,
            control_server_port: DEFAULT_CONTROL_SERVER_PORT,
            control_start_port: DEFAULT_CONTROL_START_PORT,
            token_env_var: DEFAULT_TOKEN_ENV_VAR.to_string(),
        }
    }
}
