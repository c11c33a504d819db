//! Error types for the collaborator client.

use thiserror::Error;

/// Collaborator client error type.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for API endpoints: {0}")]
    InvalidBaseUrl(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The collaborator returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
