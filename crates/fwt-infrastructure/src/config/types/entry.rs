//! Test entry point configuration types

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// How the runner launches the driver of each test
///
/// The process runs `<program> <script> <driver args>` from inside the test
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EntryPointConfig {
    pub program: String,
    pub script: String,
}

impl Default for EntryPointConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_ENTRY_PROGRAM.to_string(),
            script: DEFAULT_ENTRY_SCRIPT.to_string(),
        }
    }
}
