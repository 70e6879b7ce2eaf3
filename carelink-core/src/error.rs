//! Error types shared by every carelink crate

use thiserror::Error;

/// Errors raised by configuration, storage, routing and session state
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or decoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The persisted key/value map is unreadable
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected before any side effect happened
    #[error("Validation error: {0}")]
    Validation(String),

    /// A route, profile or other lookup came back empty
    #[error("Not found: {0}")]
    NotFound(String),

    /// A view loader failed to produce a view
    #[error("View error: {0}")]
    View(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
