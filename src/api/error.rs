//! Backend-specific error types
//!
//! This module defines all error types that can occur while talking to the
//! page-library backend. Errors are categorized so callers can distinguish
//! transport failures from explicit backend rejections.

use thiserror::Error;

/// Backend communication errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure reaching the backend
    #[error("Request failed: {0}")]
    Transport(String),

    /// Backend responded with a non-success status code
    #[error("Backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be read
    #[error("Error while reading response: {0}")]
    Read(#[from] std::io::Error),

    /// Response body was not the expected JSON shape
    #[error("Error while parsing response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid input provided (e.g. an empty document-name set)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => {
                let message = response.into_string().unwrap_or_default();
                Self::Status { status, message }
            }
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}
