//! Configuration types, one module per section

mod app;
mod core_backend;
mod docker;
mod entry;
mod logging;
mod runner;

pub use self::app::AppConfig;
pub use self::core_backend::CoreConfig;
pub use self::docker::DockerConfig;
pub use self::entry::EntryPointConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::runner::RunnerConfig;
