//! Blocklist driver: runs [`blocked_ip_scenario`] against the fixture

use anyhow::Result;
use fwt_infrastructure::logging::init_logging;
use fwt_infrastructure::{LogFormat, LoggingConfig};
use fwt_testkit::TestContext;
use fwt_testkit::scenarios::blocked_ip_scenario;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(&LoggingConfig {
        format: LogFormat::Github,
        ..LoggingConfig::default()
    })?;

    let ctx = TestContext::from_args()?;
    blocked_ip_scenario(&ctx).await?.finish()?;
    Ok(())
}
