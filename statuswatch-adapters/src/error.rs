//! Error types for adapters.

use thiserror::Error;

/// Errors that can occur when collecting a snapshot from a status page.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The status page does not exist.
    #[error("Status page '{0}' not found")]
    NotFound(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// The response parsed but carried data we refuse to display,
    /// such as a heartbeat time that cannot be ordered.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The configured status page address could not be understood.
    #[error("Invalid status page URL: {0}")]
    InvalidUrl(String),
}

#[cfg(feature = "uptime-kuma")]
impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdapterError::Timeout
        } else if err.is_connect() {
            AdapterError::Connection(err.to_string())
        } else if err.is_decode() {
            AdapterError::Parse(err.to_string())
        } else {
            AdapterError::Http(err.to_string())
        }
    }
}

impl From<url::ParseError> for AdapterError {
    fn from(err: url::ParseError) -> Self {
        AdapterError::InvalidUrl(err.to_string())
    }
}
