/// Error types for the VED API library
use thiserror::Error;

/// Main error type for upstream fetch and parse operations.
///
/// These never escape the aggregator: air quality and weather failures
/// leave the previous snapshot in place, history failures select the
/// simulated substitute.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Failed to parse an upstream JSON payload
    #[error("Failed to parse response: {0}")]
    ResponseParse(#[from] serde_json::Error),
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;
