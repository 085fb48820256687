//! Tests for layered configuration loading

use std::path::PathBuf;
use std::time::Duration;

use fwt_domain::TestType;
use fwt_infrastructure::config::{AppConfig, ConfigLoader, LogFormat, validate_app_config};
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("fwt.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_defaults() {
    let config = AppConfig::default();

    assert_eq!(config.runner.tests_dir, PathBuf::from("server_tests"));
    assert_eq!(config.runner.test_type, TestType::Server);
    assert_eq!(config.runner.max_parallel_tests, 5);
    assert_eq!(config.runner.test_timeout(), Duration::from_secs(300));
    assert_eq!(config.docker.image, "firewall-tester-action-docker-image");
    assert_eq!(config.docker.app_port, 3000);
    assert_eq!(config.docker.start_port, 3001);
    assert_eq!(config.core.base_url(), "http://localhost:3000");
    assert_eq!(config.entry.program, "python3");
    assert_eq!(config.logging.format, LogFormat::Plain);
    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_toml_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[runner]
tests_dir = "control_tests"
test_type = "control"
max_parallel_tests = 2
skip_tests = ["test_wave_attack"]

[docker]
app_port = 8080
extra_args = ["--add-host", "host.docker.internal:host-gateway"]

[logging]
level = "debug"
format = "github"
"#,
    );

    let config = ConfigLoader::new()
        .with_env_prefix("FWT_LOADER_TOML_TEST")
        .with_config_path(&path)
        .load()
        .unwrap();

    assert_eq!(config.runner.tests_dir, PathBuf::from("control_tests"));
    assert_eq!(config.runner.test_type, TestType::Control);
    assert_eq!(config.runner.max_parallel_tests, 2);
    assert_eq!(config.runner.skip_tests, vec!["test_wave_attack".to_string()]);
    assert_eq!(config.docker.app_port, 8080);
    assert_eq!(config.docker.extra_args.len(), 2);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Github);

    // untouched sections keep their defaults
    assert_eq!(config.runner.test_timeout, 300);
    assert_eq!(config.core.port, 3000);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let err = ConfigLoader::new()
        .with_config_path(temp.path().join("absent.toml"))
        .load()
        .unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}

#[test]
fn test_malformed_toml_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[runner]\nmax_parallel_tests = \"many\"\n");

    let err = ConfigLoader::new()
        .with_env_prefix("FWT_LOADER_BAD_TEST")
        .with_config_path(&path)
        .load()
        .unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_validation_rejects_zero_values() {
    let mut config = AppConfig::default();
    config.runner.max_parallel_tests = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.runner.test_timeout = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.docker.app_port = 0;
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_validation_rejects_unknown_log_level() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();

    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_invalid_file_values_fail_validation() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[runner]\ntest_timeout = 0\n");

    let result = ConfigLoader::new()
        .with_env_prefix("FWT_LOADER_ZERO_TEST")
        .with_config_path(&path)
        .load();
    assert!(result.is_err());
}

#[test]
fn test_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("saved.toml");

    let mut config = AppConfig::default();
    config.runner.run_tests = vec!["test_sql_injection".to_string()];
    config.runner.json_report = Some(PathBuf::from("report.json"));
    config.logging.format = LogFormat::Json;

    let loader = ConfigLoader::new().with_env_prefix("FWT_LOADER_SAVE_TEST");
    loader.save_to_file(&config, &path).unwrap();

    let reloaded = loader.with_config_path(&path).load().unwrap();
    assert_eq!(reloaded, config);
}

/// Run with: `cargo test -p fwt-infrastructure --test unit -- --ignored --test-threads=1`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_file() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[runner]\nmax_parallel_tests = 2\n");

    // SAFETY: run with --test-threads=1
    unsafe {
        std::env::set_var("FWT_ENV_TEST_RUNNER__MAX_PARALLEL_TESTS", "7");
        std::env::set_var("FWT_ENV_TEST_DOCKER__IMAGE", "custom-image");
    }

    let config = ConfigLoader::new()
        .with_env_prefix("FWT_ENV_TEST")
        .with_config_path(&path)
        .load()
        .unwrap();

    // SAFETY: run with --test-threads=1
    unsafe {
        std::env::remove_var("FWT_ENV_TEST_RUNNER__MAX_PARALLEL_TESTS");
        std::env::remove_var("FWT_ENV_TEST_DOCKER__IMAGE");
    }

    assert_eq!(config.runner.max_parallel_tests, 7);
    assert_eq!(config.docker.image, "custom-image");
}
