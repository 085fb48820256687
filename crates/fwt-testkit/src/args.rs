//! Arguments passed by the runner to every test entry point

use clap::Parser;

/// Default port of the mock core backend
pub const DEFAULT_CORE_PORT: u16 = 3000;

/// Default config update delay in seconds
pub const DEFAULT_CONFIG_UPDATE_DELAY: u64 = 60;

/// Command line contract between the runner and a test driver
///
/// Flag names use underscores so drivers written in any language parse the
/// same command line.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(about = "Firewall test driver")]
pub struct DriverArgs {
    /// Host port of the application under test
    #[arg(long = "server_port")]
    pub server_port: u16,

    /// Token of the test application in core
    #[arg(long)]
    pub token: String,

    /// Port of the mock core backend
    #[arg(long = "core_port", default_value_t = DEFAULT_CORE_PORT)]
    pub core_port: u16,

    /// Seconds to wait after pushing configuration to core
    #[arg(long = "config_update_delay", default_value_t = DEFAULT_CONFIG_UPDATE_DELAY)]
    pub config_update_delay: u64,

    /// Host port of the control server, for control tests
    #[arg(long = "control_server_port")]
    pub control_server_port: Option<u16>,
}

impl DriverArgs {
    /// Render back into command line arguments
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![
            "--server_port".to_string(),
            self.server_port.to_string(),
            "--token".to_string(),
            self.token.clone(),
            "--config_update_delay".to_string(),
            self.config_update_delay.to_string(),
            "--core_port".to_string(),
            self.core_port.to_string(),
        ];
        if let Some(port) = self.control_server_port {
            args.push("--control_server_port".to_string());
            args.push(port.to_string());
        }
        args
    }
}
