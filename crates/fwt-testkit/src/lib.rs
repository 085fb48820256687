//! Test Kit for Firewall Test Drivers
//!
//! Everything a test entry point needs to drive one fixture:
//! - [`DriverArgs`]: the command line the runner passes to every test
//! - [`TestContext`]: explicit clients built from those arguments
//! - [`AppClient`], [`CoreApi`], [`ControlServer`]: HTTP clients with
//!   connection retries
//! - response assertions, hard ([`assert_response_code_is`] ..) and soft
//!   ([`ResponseAssertions`] on an [`AssertionCollector`])
//! - [`scenarios`]: reference flows shared by the driver binaries
//!
//! ```ignore
//! let ctx = TestContext::from_args()?;
//! let mut collector = AssertionCollector::new();
//! let response = ctx.app().get("/api/pets/").await?;
//! collector.soft_assert_response_code_is(&response, 200, "benign request");
//! collector.finish()?;
//! ```

pub mod app;
pub mod args;
pub mod context;
pub mod control;
pub mod core_api;
pub mod error;
pub mod http;
pub mod response;
pub mod scenarios;

pub use app::AppClient;
pub use args::DriverArgs;
pub use context::TestContext;
pub use control::ControlServer;
pub use core_api::CoreApi;
pub use error::{Result, TestkitError};
pub use fwt_validate::{AssertionCollector, AssertionFailure, AssertionFailures};
pub use http::{HttpSession, RetryPolicy};
pub use response::{
    ResponseAssertions, TestResponse, assert_response_body_contains, assert_response_code_is,
    assert_response_code_is_not, assert_response_header_contains,
};
