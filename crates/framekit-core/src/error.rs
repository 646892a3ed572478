//! Error handling for FrameKit
//!
//! A locate request either resolves deterministically or fails with a
//! configuration error; there are no retryable conditions. All error types
//! use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for FrameKit
///
/// Represents unrecoverable configuration errors observed while resolving
/// a locate request. Transient conditions (zero-extent edges, ignored
/// overrides) are handled with defaults and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A mandatory parameter word was not supplied with the request
    #[error("Missing required parameter '{word}'")]
    MissingParameter {
        /// The single-letter parameter word that was absent.
        word: char,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a missing-parameter error
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, Error::MissingParameter { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
