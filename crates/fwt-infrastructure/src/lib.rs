//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns shared by the runner, the CLI and the
//! test kit.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered configuration (defaults, TOML, environment) |
//! | [`constants`] | Defaults and well-known names |
//! | [`error_ext`] | Context helpers converting foreign errors into domain errors |
//! | [`logging`] | Structured logging with tracing |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, LogFormat, LoggingConfig};
pub use error_ext::ErrorContext;
