//! Unified error types for the status relay.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for the status relay.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Render API error.
    #[error("render api error: {0}")]
    Api(#[from] ApiError),

    /// HTTP client construction error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render API lookup errors.
///
/// Handlers treat every variant the same way: the lookup failed.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure or timeout.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("{path} returned HTTP {status}")]
    Status {
        /// HTTP status returned.
        status: StatusCode,
        /// Request path.
        path: String,
    },

    /// Upstream payload did not have the expected shape.
    #[error("failed to decode response from {path}: {reason}")]
    Decode {
        /// Request path.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// Service id could not be placed in a request URL.
    #[error("invalid service id: {0:?}")]
    InvalidServiceId(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, RelayError>;
