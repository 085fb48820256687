//! Error types for test drivers

use fwt_validate::{AssertionFailure, AssertionFailures};
use thiserror::Error;

/// Result type alias for test kit operations
pub type Result<T> = std::result::Result<T, TestkitError>;

/// Errors raised while driving a fixture
#[derive(Error, Debug)]
pub enum TestkitError {
    /// The request could not be sent or its body could not be read
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The peer answered with an unexpected status
    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("Invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A local file (config or expectation) could not be loaded
    #[error("Cannot load {path}: {message}")]
    File { path: String, message: String },

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A control server call was made by a driver started without one
    #[error("No control server port was passed to this test")]
    NoControlServer,

    /// A hard assertion failed
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),

    /// Soft assertions failed
    #[error(transparent)]
    Assertions(#[from] AssertionFailures),
}
