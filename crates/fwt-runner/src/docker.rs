//! Docker CLI fixture provider

use std::path::Path;
use std::process::{Output, Stdio};

use async_trait::async_trait;
use fwt_domain::error::{Error, Result};
use tokio::process::Command;
use tracing::{debug, info};

use crate::fixture::{FixtureProvider, FixtureSpec};

/// Runs fixtures with the `docker` command line
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl DockerCli {
    pub fn new<S: Into<String>>(binary: S) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the fixture image, once, before any test starts
    pub async fn build_image(
        &self,
        image: &str,
        dockerfile: &Path,
        extra_build_args: &[String],
    ) -> Result<()> {
        let args = build_args(image, dockerfile, extra_build_args)?;
        info!(image, dockerfile = %dockerfile.display(), "Building fixture image");

        let output = self.docker(&args).await.map_err(|e| Error::ImageBuild {
            message: e.to_string(),
        })?;
        if !output.status.success() {
            return Err(Error::ImageBuild {
                message: failure_detail(&output),
            });
        }
        Ok(())
    }

    async fn docker(&self, args: &[String]) -> Result<Output> {
        debug!(command = %format!("{} {}", self.binary, args.join(" ")), "Running docker");
        Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::Io {
                message: format!("Failed to run {}", self.binary),
                source: Some(Box::new(e)),
            })
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

#[async_trait]
impl FixtureProvider for DockerCli {
    async fn start(&self, spec: &FixtureSpec) -> Result<()> {
        let output = self
            .docker(&run_args(spec))
            .await
            .map_err(|e| Error::fixture_start(&spec.test_id, e.to_string()))?;
        if !output.status.success() {
            return Err(Error::fixture_start(&spec.test_id, failure_detail(&output)));
        }
        info!(test = %spec.test_id, container = %spec.container_name, port = spec.host_port, "Fixture started");
        Ok(())
    }

    async fn logs(&self, spec: &FixtureSpec) -> Result<String> {
        let args = vec!["logs".to_string(), spec.container_name.clone()];
        let output = self.docker(&args).await?;
        if !output.status.success() {
            return Err(Error::io(format!(
                "docker logs {} failed: {}",
                spec.container_name,
                failure_detail(&output)
            )));
        }
        let mut logs = String::from_utf8_lossy(&output.stdout).into_owned();
        logs.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(logs)
    }

    async fn stop(&self, spec: &FixtureSpec) -> Result<()> {
        let stop = vec!["stop".to_string(), spec.container_name.clone()];
        let stopped = self.docker(&stop).await?;
        if !stopped.status.success() {
            debug!(container = %spec.container_name, detail = %failure_detail(&stopped), "docker stop failed");
        }

        let remove = vec!["rm".to_string(), "-f".to_string(), spec.container_name.clone()];
        let removed = self.docker(&remove).await?;
        if !removed.status.success() {
            return Err(Error::io(format!(
                "docker rm -f {} failed: {}",
                spec.container_name,
                failure_detail(&removed)
            )));
        }
        Ok(())
    }
}

/// `docker build` arguments; the build context is the Dockerfile's directory
pub fn build_args(image: &str, dockerfile: &Path, extra_build_args: &[String]) -> Result<Vec<String>> {
    if !dockerfile.is_file() {
        return Err(Error::ImageBuild {
            message: format!("Dockerfile not found: {}", dockerfile.display()),
        });
    }
    let context = dockerfile
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut args = vec![
        "build".to_string(),
        "-t".to_string(),
        image.to_string(),
        "-f".to_string(),
        dockerfile.display().to_string(),
        context.display().to_string(),
    ];
    args.extend(extra_build_args.iter().cloned());
    Ok(args)
}

/// `docker run` arguments for a detached fixture
pub fn run_args(spec: &FixtureSpec) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "--name".to_string(),
        spec.container_name.clone(),
        "-p".to_string(),
        format!("{}:{}", spec.host_port, spec.app_port),
    ];
    if let Some((host, container)) = spec.control_ports {
        args.push("-p".to_string());
        args.push(format!("{host}:{container}"));
    }
    if let Some(env_file) = &spec.env_file {
        args.push("--env-file".to_string());
        args.push(env_file.display().to_string());
    }
    let (name, value) = &spec.token_env;
    args.push("--env".to_string());
    args.push(format!("{name}={value}"));
    args.extend(spec.extra_args.iter().cloned());
    args.push(spec.image.clone());
    args
}

fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let detail = stderr.trim();
    if detail.is_empty() {
        format!("exited with {}", output.status)
    } else {
        detail.to_string()
    }
}
