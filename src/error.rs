//! Error types for bestiary
//!
//! Provides standardized error handling across the service.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in bestiary
#[derive(Debug, Error)]
pub enum BestiaryError {
    /// The backing record store is unreachable or failed mid-read.
    /// Logged with detail server-side, surfaced generically to clients.
    #[error("species store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Dataset file could not be parsed
    #[error("dataset parse error in {path}: {source}")]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for bestiary operations
pub type BestiaryResult<T> = Result<T, BestiaryError>;
