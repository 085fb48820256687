//! Tests for the Docker CLI provider

use std::path::PathBuf;

use fwt_domain::error::Error;
use fwt_runner::docker::{build_args, run_args};
use fwt_runner::{DockerCli, FixtureProvider, FixtureSpec};
use tempfile::TempDir;

fn spec() -> FixtureSpec {
    FixtureSpec {
        test_id: "test_a".to_string(),
        container_name: "test_a-0".to_string(),
        image: "fwt-app:latest".to_string(),
        host_port: 3001,
        app_port: 3000,
        control_ports: None,
        env_file: None,
        token_env: ("AIKIDO_TOKEN".to_string(), "secret".to_string()),
        extra_args: vec!["--network=host".to_string()],
    }
}

#[test]
fn test_run_args_server_fixture() {
    assert_eq!(
        run_args(&spec()),
        vec![
            "run",
            "-d",
            "--name",
            "test_a-0",
            "-p",
            "3001:3000",
            "--env",
            "AIKIDO_TOKEN=secret",
            "--network=host",
            "fwt-app:latest",
        ]
    );
}

#[test]
fn test_run_args_control_fixture_with_env_file() {
    let spec = FixtureSpec {
        control_ports: Some((8100, 8081)),
        env_file: Some(PathBuf::from("/tests/control_test_a/test.env")),
        ..spec()
    };
    let args = run_args(&spec);

    let joined = args.join(" ");
    assert!(joined.contains("-p 3001:3000 -p 8100:8081"));
    assert!(joined.contains("--env-file /tests/control_test_a/test.env"));
    assert_eq!(args.last().map(String::as_str), Some("fwt-app:latest"));
}

#[test]
fn test_build_args_use_dockerfile_directory_as_context() {
    let dir = TempDir::new().unwrap();
    let dockerfile = dir.path().join("Dockerfile");
    std::fs::write(&dockerfile, "FROM scratch\n").unwrap();

    let args = build_args("fwt-app:latest", &dockerfile, &["--no-cache".to_string()]).unwrap();

    assert_eq!(args[..4], ["build", "-t", "fwt-app:latest", "-f"]);
    assert_eq!(args[4], dockerfile.display().to_string());
    assert_eq!(args[5], dir.path().display().to_string());
    assert_eq!(args[6], "--no-cache");
}

#[test]
fn test_build_args_missing_dockerfile() {
    let dir = TempDir::new().unwrap();
    let err = build_args("img", &dir.path().join("Dockerfile"), &[]).unwrap_err();
    assert!(matches!(err, Error::ImageBuild { .. }));
}

#[tokio::test]
async fn test_start_failure_is_a_fixture_error() {
    let cli = DockerCli::new("false");
    let err = cli.start(&spec()).await.unwrap_err();
    assert!(matches!(err, Error::FixtureStart { ref test, .. } if test == "test_a"));
}

#[tokio::test]
async fn test_missing_binary_is_reported() {
    let cli = DockerCli::new("/nonexistent/docker-binary");
    let err = cli.logs(&spec()).await.unwrap_err();
    assert!(err.to_string().contains("Failed to run /nonexistent/docker-binary"));
}

#[tokio::test]
async fn test_successful_commands() {
    let cli = DockerCli::new("true");
    cli.start(&spec()).await.unwrap();
    assert_eq!(cli.logs(&spec()).await.unwrap(), "");
    cli.stop(&spec()).await.unwrap();
}
