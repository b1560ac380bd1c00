//! Common error types for drive-index.

use thiserror::Error;

/// Top-level error type for drive-index operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Caller supplied an identifier that is not strictly alphanumeric.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// The upstream API answered with an error status.
    ///
    /// `body` is the upstream payload, parsed as JSON when possible and
    /// otherwise kept as a JSON string.
    #[error("Upstream error: {status}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    /// The upstream could not be reached or its answer could not be read.
    #[error("Network error: {0}")]
    Network(String),

    /// No access token could be obtained.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
