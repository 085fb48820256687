//! Reference scenarios shared by driver binaries
//!
//! Each scenario drives one fixture through a [`TestContext`] and returns
//! the collector holding its soft assertion failures. Transport errors are
//! returned as errors.

use std::time::Duration;

use fwt_validate::AssertionCollector;
use serde_json::{Value, json};
use tracing::info;

use crate::context::TestContext;
use crate::error::Result;
use crate::response::ResponseAssertions;

/// Address put on the blocklist by [`blocked_ip_scenario`]
pub const BLOCKED_IP: &str = "2.16.53.5";

/// Route requested from the blocked address
pub const PROTECTED_ROUTE: &str = "/api/pets/";

/// Firewall lists blocking exactly `ips`
pub fn firewall_lists(ips: &[&str]) -> Value {
    json!({
        "blockedIPAddresses": [{
            "key": "known_threat_actors",
            "source": "test",
            "description": "geo restrictions",
            "ips": ips,
        }],
        "blockedUserAgents": "",
        "allowedIPAddresses": [],
    })
}

/// Blocklist round trip
///
/// 1. Put [`BLOCKED_IP`] on the blocked IP list
/// 2. A request from that address is answered 403 with "is blocked"
/// 3. Remove the address from the list
/// 4. The same request is answered 200
pub async fn blocked_ip_scenario(ctx: &TestContext) -> Result<AssertionCollector> {
    let delay = Duration::from_secs(ctx.args().config_update_delay);
    let headers = [("X-Forwarded-For", BLOCKED_IP)];
    let mut collector = AssertionCollector::new();

    ctx.core()
        .update_firewall_lists(&firewall_lists(&[BLOCKED_IP]))
        .await?;
    info!(ip = BLOCKED_IP, ?delay, "Blocklist applied");
    tokio::time::sleep(delay).await;

    let response = ctx.app().get_with_headers(PROTECTED_ROUTE, &headers).await?;
    collector.soft_assert_response_code_is(&response, 403, "Blocked IP was let through");
    collector.soft_assert_response_body_contains(&response, "is blocked", "Blocked IP response");

    ctx.core().update_firewall_lists(&firewall_lists(&[])).await?;
    info!(ip = BLOCKED_IP, ?delay, "Blocklist cleared");
    tokio::time::sleep(delay).await;

    let response = ctx.app().get_with_headers(PROTECTED_ROUTE, &headers).await?;
    collector.soft_assert_response_code_is(&response, 200, "Unblocked IP was rejected");

    Ok(collector)
}
