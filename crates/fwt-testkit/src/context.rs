//! Per-test context owning every client a driver needs

use std::time::Duration;

use crate::app::AppClient;
use crate::args::DriverArgs;
use crate::control::ControlServer;
use crate::core_api::CoreApi;
use crate::error::{Result, TestkitError};

/// Clients built from the driver arguments
#[derive(Debug, Clone)]
pub struct TestContext {
    args: DriverArgs,
    app: AppClient,
    core: CoreApi,
    control: Option<ControlServer>,
}

impl TestContext {
    /// Parse the process arguments and build the clients
    pub fn from_args() -> Result<Self> {
        use clap::Parser;
        Self::new(DriverArgs::parse())
    }

    pub fn new(args: DriverArgs) -> Result<Self> {
        let app = AppClient::localhost(args.server_port)?;
        let core = CoreApi::new(format!("http://localhost:{}", args.core_port), &args.token)?
            .with_config_update_delay(Duration::from_secs(args.config_update_delay));
        let control = args
            .control_server_port
            .map(ControlServer::localhost)
            .transpose()?;
        Ok(Self {
            args,
            app,
            core,
            control,
        })
    }

    pub fn args(&self) -> &DriverArgs {
        &self.args
    }

    pub fn app(&self) -> &AppClient {
        &self.app
    }

    pub fn core(&self) -> &CoreApi {
        &self.core
    }

    /// Control server client; errors for drivers started without one
    pub fn control(&self) -> Result<&ControlServer> {
        self.control.as_ref().ok_or(TestkitError::NoControlServer)
    }
}
