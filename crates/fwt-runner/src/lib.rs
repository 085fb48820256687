//! Parallel Test Runner for Firewall Tests
//!
//! Runs every test directory against its own fixture container:
//! - Discovery and selection of test directories (`discovery`)
//! - Port and container name allocation (`allocator`)
//! - Fixture lifecycle over the Docker CLI (`fixture`, `docker`)
//! - Start configuration pushed to core (`backend`)
//! - Test process execution with timeouts (`process`, `executor`)
//! - Failure extraction and crash detection (`failures`, `crash`)
//! - Bounded parallel scheduling (`runner`)
//! - Reports and their destinations (`report`, `sink`)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use fwt_runner::{DockerCli, ExecutorSettings, HttpCoreBackend, RunOptions, TestExecutor, TestRunner};
//!
//! let settings = ExecutorSettings::from_config(&config);
//! let executor = TestExecutor::new(
//!     settings,
//!     Arc::new(DockerCli::new(&config.docker.binary)),
//!     Arc::new(HttpCoreBackend::new(config.core.base_url(), config.core.request_timeout())?),
//! );
//! let summary = TestRunner::new(Arc::new(executor))
//!     .run_all(&test_ids, &RunOptions::new(5, timeout))
//!     .await;
//! ```

pub mod allocator;
pub mod backend;
pub mod crash;
pub mod discovery;
pub mod docker;
pub mod executor;
pub mod failures;
pub mod fixture;
pub mod process;
pub mod report;
pub mod runner;
pub mod sink;

pub use allocator::{FixtureAllocator, FixtureSlot};
pub use backend::{CoreBackend, HttpCoreBackend};
pub use crash::{CrashReport, detect_crash};
pub use discovery::{Selection, discover_tests, parse_test_list, select_tests};
pub use docker::DockerCli;
pub use executor::{ExecutorSettings, TestExecutor, classify};
pub use fixture::{FixtureProvider, FixtureSpec};
pub use process::{EntryPoint, ProcessOutcome, run_test_process};
pub use report::{Reporter, write_json_report};
pub use runner::{RunOptions, TestRunner};
pub use sink::{ConsoleSink, GithubStepSummary, SummarySink, detect_sink, publish_summary};
