//! Firewall Tester
//!
//! Facade crate for the `fwt` binary: command line parsing and the run
//! pipeline wiring configuration, logging and the parallel runner.

pub mod app;
pub mod cli;

pub use app::{SETUP_ERROR_EXIT_CODE, load_config, run};
pub use cli::Cli;
