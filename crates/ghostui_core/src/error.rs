//! Host error types

use thiserror::Error;

/// Host environment errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host cannot deliver this kind of event (e.g. no pointer events)
    #[error("Event type not supported by host: {0}")]
    Unsupported(u32),

    /// Generic host error
    #[error("Host error: {0}")]
    Other(String),
}

/// Durable storage errors
///
/// These are always recoverable: callers treat storage as best effort.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Storage is disabled or absent in this context
    #[error("Storage unavailable")]
    Unavailable,

    /// The write exceeded the origin quota
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// Generic storage error
    #[error("Storage error: {0}")]
    Other(String),
}

/// A required-context accessor ran outside a mounted provider.
///
/// Always surfaced: it signals an integration bug in the consuming tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{context} accessed outside of its provider; mount a {provider} above this component")]
pub struct MissingProviderError {
    pub context: &'static str,
    pub provider: &'static str,
}

impl MissingProviderError {
    pub const fn new(context: &'static str, provider: &'static str) -> Self {
        Self { context, provider }
    }
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, HostError>;
