//! Configuration management
//!
//! Values are layered by [`ConfigLoader`]: built-in defaults, then a TOML
//! file, then `FWT_` environment variables. The CLI applies its own flags
//! on top of the loaded [`AppConfig`].

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::{
    AppConfig, CoreConfig, DockerConfig, EntryPointConfig, LogFormat, LoggingConfig, RunnerConfig,
};
