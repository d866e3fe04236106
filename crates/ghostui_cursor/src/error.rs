//! Cursor effect error types

pub use ghostui_core::MissingProviderError;
use thiserror::Error;

/// Cursor effect errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error(transparent)]
    MissingProvider(#[from] MissingProviderError),

    /// Configuration could not be parsed
    #[error("Invalid cursor effect config: {0}")]
    Config(String),
}

/// Result type for cursor effect operations
pub type Result<T> = std::result::Result<T, CursorError>;
