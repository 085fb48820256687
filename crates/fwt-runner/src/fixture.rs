//! Fixture lifecycle port
//!
//! A fixture is one running instance of the application under test. The
//! runner only sees this trait; [`crate::docker::DockerCli`] is the
//! production implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use fwt_domain::error::Result;

/// Everything needed to start one fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSpec {
    pub test_id: String,
    pub container_name: String,
    pub image: String,

    /// Host port mapped to the application port
    pub host_port: u16,
    /// Application port inside the container
    pub app_port: u16,
    /// Host and container port of the control server, for control tests
    pub control_ports: Option<(u16, u16)>,

    /// `test.env` of the test, when present
    pub env_file: Option<PathBuf>,
    /// Name and value of the token variable
    pub token_env: (String, String),
    /// Extra `docker run` arguments
    pub extra_args: Vec<String>,
}

/// Starts, inspects and removes fixtures
#[async_trait]
pub trait FixtureProvider: Send + Sync {
    /// Start the fixture in the background
    async fn start(&self, spec: &FixtureSpec) -> Result<()>;

    /// Combined output of the application so far
    async fn logs(&self, spec: &FixtureSpec) -> Result<String>;

    /// Stop and remove the fixture
    async fn stop(&self, spec: &FixtureSpec) -> Result<()>;
}
