use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{CONTROL_TEST_PREFIX, SERVER_TEST_PREFIX};

/// Kind of test suite to run
///
/// Server tests talk to the application only. Control tests additionally
/// drive the sidecar control server, which the fixture must expose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    #[default]
    Server,
    Control,
}

impl TestType {
    /// Directory-name prefix that marks a test case of this kind
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Server => SERVER_TEST_PREFIX,
            Self::Control => CONTROL_TEST_PREFIX,
        }
    }

    pub fn is_test_dir(self, dir_name: &str) -> bool {
        dir_name.starts_with(self.prefix())
    }

    pub fn uses_control_server(self) -> bool {
        matches!(self, Self::Control)
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Control => write!(f, "control"),
        }
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "server" => Ok(Self::Server),
            "control" => Ok(Self::Control),
            other => Err(format!(
                "Invalid test type: {other}. Use 'server' or 'control'"
            )),
        }
    }
}
