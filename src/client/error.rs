//! Client error types

use thiserror::Error;

/// Errors that can occur when talking to the document assistant service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Service unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Classify a reqwest transport error the way callers care about
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else if e.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(e)
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
