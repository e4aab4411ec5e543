//! Error types for the Runway serving API

use thiserror::Error;

/// Main error type for Runway serving API operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Validation error for CRD specs
    #[error("validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Create a validation error with the given message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
