//! End-to-end run: configuration, image, tests, report, exit code

use std::sync::Arc;

use fwt_domain::error::Result;
use fwt_infrastructure::config::validate_app_config;
use fwt_infrastructure::logging::init_logging;
use fwt_infrastructure::{AppConfig, ConfigLoader};
use fwt_runner::{
    DockerCli, ExecutorSettings, HttpCoreBackend, Reporter, RunOptions, TestExecutor, TestRunner,
    detect_sink, discover_tests, publish_summary, write_json_report,
};
use tracing::{info, warn};

use crate::cli::Cli;

/// Exit code for configuration and setup errors
pub const SETUP_ERROR_EXIT_CODE: u8 = 2;

/// Load the configuration with the CLI flags applied on top
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;
    cli.apply_overrides(&mut config);
    validate_app_config(&config)?;
    Ok(config)
}

/// Run the whole suite and return the process exit code
///
/// Test failures map to exit code 1 unless failures are ignored; setup
/// errors are returned to the caller.
pub async fn run(cli: &Cli) -> Result<u8> {
    let config = load_config(cli)?;
    init_logging(&config.logging)?;

    let test_ids = discover_tests(&config.runner.tests_dir, config.runner.test_type)?;
    if test_ids.is_empty() {
        warn!(
            tests_dir = %config.runner.tests_dir.display(),
            test_type = %config.runner.test_type,
            "No tests found"
        );
    }

    let docker = DockerCli::new(&config.docker.binary);
    if let Some(dockerfile) = &config.docker.dockerfile_path {
        docker
            .build_image(&config.docker.image, dockerfile, &config.docker.extra_build_args)
            .await?;
    }

    let core = HttpCoreBackend::new(config.core.base_url(), config.core.request_timeout())?;
    let executor = TestExecutor::new(
        ExecutorSettings::from_config(&config),
        Arc::new(docker),
        Arc::new(core),
    );
    let options = RunOptions::new(config.runner.max_parallel_tests, config.runner.test_timeout())
        .with_skip(config.runner.skip_tests.iter().cloned())
        .with_include(config.runner.run_tests.iter().cloned());

    let summary = TestRunner::new(Arc::new(executor))
        .run_all(&test_ids, &options)
        .await;

    let sink = detect_sink();
    publish_summary(sink.as_ref(), &Reporter::to_ci_summary(&summary));
    if let Some(path) = &config.runner.json_report {
        write_json_report(&summary, path)?;
        info!(path = %path.display(), "JSON report written");
    }

    let counts = summary.counts();
    let exit_code = summary.exit_code(config.runner.ignore_failures);
    info!(
        passed = counts.passed,
        failed = counts.failed,
        timed_out = counts.timed_out,
        skipped = counts.skipped,
        exit_code,
        "Run finished"
    );
    if summary.has_failures() && config.runner.ignore_failures {
        warn!("Failures ignored by configuration");
    }
    Ok(exit_code)
}
