//! Firewall Tester - Entry Point
//!
//! ## Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Every test passed, or failures are ignored |
//! | 1 | At least one test failed or timed out |
//! | 2 | Configuration or setup error |

use std::process::ExitCode;

use clap::Parser;
use fwt::{Cli, SETUP_ERROR_EXIT_CODE, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(SETUP_ERROR_EXIT_CODE)
        }
    }
}
