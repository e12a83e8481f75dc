//! Plan API error types

use thiserror::Error;

/// Errors that can occur while talking to a plan endpoint
///
/// Only transport failures are errors here. Any HTTP response, whatever its
/// status, is returned to the caller as a [`super::RawResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Canned failure returned by the test mock
    #[cfg(test)]
    #[error("{0}")]
    Transport(String),

    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}
