//! Error types for the market kit
//!
//! The numeric core never fails; these errors cover the edges around it:
//! decoding exchange payloads, validating request parameters and loading
//! configuration.

use std::fmt::Display;
use thiserror::Error;

/// Market kit error type
#[derive(Debug, Error)]
pub enum Error {
    /// Trading pair symbol could not be parsed
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Trade side was neither buy nor sell
    #[error("Invalid side: {0}")]
    InvalidSide(String),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Exchange payload did not have the expected shape
    #[error("Malformed upstream data: {0}")]
    UpstreamFormat(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to error results
pub trait ErrorExt<T> {
    /// Add context information to an error
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display;
}

impl<T> ErrorExt<T> for Result<T> {
    fn with_context<C, F>(self, context_fn: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Display,
    {
        self.map_err(|e| {
            let context = context_fn().to_string();
            match e {
                Error::InvalidSymbol(msg) => Error::InvalidSymbol(format!("{}: {}", context, msg)),
                Error::InvalidSide(msg) => Error::InvalidSide(format!("{}: {}", context, msg)),
                Error::ValidationError(msg) => Error::ValidationError(format!("{}: {}", context, msg)),
                Error::ConfigurationError(msg) => Error::ConfigurationError(format!("{}: {}", context, msg)),
                Error::UpstreamFormat(msg) => Error::UpstreamFormat(format!("{}: {}", context, msg)),
                Error::Serialization(e) => Error::UpstreamFormat(format!("{}: {}", context, e)),
            }
        })
    }
}
