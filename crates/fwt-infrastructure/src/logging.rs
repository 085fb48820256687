//! Structured logging with tracing
//!
//! Installs the global subscriber. The console format is plain text, JSON,
//! or GitHub Actions annotations (`::error::`, `::warning::`, `::debug::`)
//! so failures surface in the workflow UI. `FWT_LOG` overrides the
//! configured filter.

use std::fmt as std_fmt;
use std::path::Path;

use fwt_domain::error::{Error, Result};
use tracing::{Event, Level, Subscriber, info, warn};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::{LogFormat, LoggingConfig};
use crate::constants::{LOG_ENV_VAR, LOG_FILE_PREFIX};

/// Initialize logging with the provided configuration
///
/// Fails if the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = config.file_output.as_ref().map(|path| {
        let appender = tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_name()
                .unwrap_or_else(|| std::ffi::OsStr::new(LOG_FILE_PREFIX)),
        );
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
    });

    let registry = Registry::default().with(filter).with(file_layer);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Github => registry
            .with(
                fmt::layer()
                    .event_format(GithubActionsFormat)
                    .with_writer(std::io::stdout),
            )
            .try_init(),
        LogFormat::Plain => registry.with(fmt::layer().with_target(true)).try_init(),
    };
    installed.map_err(|e| {
        Error::configuration_with_source("Failed to install the tracing subscriber", e)
    })?;

    info!(level = %level, format = %config.format, "Logging initialized");
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Workflow command prefix for a level; info lines stay plain
pub fn annotation_prefix(level: Level) -> &'static str {
    if level == Level::ERROR {
        "::error::"
    } else if level == Level::WARN {
        "::warning::"
    } else if level == Level::INFO {
        ""
    } else {
        "::debug::"
    }
}

/// Event formatter emitting GitHub Actions workflow commands
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubActionsFormat;

impl<S, N> FormatEvent<S, N> for GithubActionsFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std_fmt::Result {
        write!(writer, "{}", annotation_prefix(*event.metadata().level()))?;
        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}: ", span.name())?;
            }
        }
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
