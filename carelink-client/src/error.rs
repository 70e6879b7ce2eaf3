//! Error type for backend calls

use thiserror::Error;

/// Error type for API and session operations
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a readable response
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A success response did not match the endpoint's schema
    #[error("Unexpected response from {endpoint}: {reason}")]
    Schema { endpoint: String, reason: String },

    /// Local storage, configuration or routing failure
    #[error(transparent)]
    Core(#[from] carelink_core::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;
