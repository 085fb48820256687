//! Error handling types

use std::time::Duration;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the firewall tester
///
/// The runner variants (`FixtureStart` .. `CrashDetected`) abort a single
/// test. They are turned into that test's `failed` result and never stop
/// the batch.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-related error (core backend, control server)
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The fixture image could not be built
    #[error("Failed to build fixture image: {message}")]
    ImageBuild {
        /// Build failure detail
        message: String,
    },

    /// The fixture container could not be started
    #[error("Failed to start fixture for {test}: {message}")]
    FixtureStart {
        /// Test identifier
        test: String,
        /// Originating failure
        message: String,
    },

    /// Start configuration could not be pushed to core
    #[error("Failed to apply start configuration for {test}: {message}")]
    ConfigApply {
        /// Test identifier
        test: String,
        /// Originating failure
        message: String,
    },

    /// The test entry point could not be spawned
    #[error("Failed to launch test process for {test}: {message}")]
    ProcessLaunch {
        /// Test identifier
        test: String,
        /// Originating failure
        message: String,
    },

    /// The test process ran past its deadline and was killed
    #[error("Test {test} timed out after {timeout:?}")]
    TestTimeout {
        /// Test identifier
        test: String,
        /// Configured per-test timeout
        timeout: Duration,
    },

    /// The fixture logs contained a crash marker
    #[error("Crash detected in fixture logs of {test}: '{marker}'")]
    CrashDetected {
        /// Test identifier
        test: String,
        /// Matched crash marker
        marker: String,
    },
}

impl Error {
    /// Create an I/O error with a message
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a network error with source
    pub fn network_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a fixture start error for a test
    pub fn fixture_start<T: Into<String>, S: Into<String>>(test: T, message: S) -> Self {
        Self::FixtureStart {
            test: test.into(),
            message: message.into(),
        }
    }

    /// Create a config apply error for a test
    pub fn config_apply<T: Into<String>, S: Into<String>>(test: T, message: S) -> Self {
        Self::ConfigApply {
            test: test.into(),
            message: message.into(),
        }
    }

    /// Create a process launch error for a test
    pub fn process_launch<T: Into<String>, S: Into<String>>(test: T, message: S) -> Self {
        Self::ProcessLaunch {
            test: test.into(),
            message: message.into(),
        }
    }
}
