//! Error types for Tally
//!
//! This module defines the error taxonomy used throughout the crate.
//! Recording operations are the only fallible operations; every aggregate
//! read is a total function and returns 0 for empty state.

use thiserror::Error;

/// Errors raised by recording operations
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Tokenization failed: {source}")]
    Tokenization {
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// Create a tokenization error from any underlying failure
    pub fn tokenization(source: impl Into<anyhow::Error>) -> Self {
        Self::Tokenization {
            source: source.into(),
        }
    }
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;
