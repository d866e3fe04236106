//! Theme error types

pub use ghostui_core::MissingProviderError;
use thiserror::Error;

/// Theme errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error(transparent)]
    MissingProvider(#[from] MissingProviderError),

    /// Value is not one of the theme ids
    #[error("Invalid theme: {0:?} (expected \"spectral\" or \"blood\")")]
    InvalidTheme(String),

    /// Configuration could not be parsed
    #[error("Invalid theme config: {0}")]
    Config(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
