//! Policy error types
//!
//! Checks never fail a review run. These errors only describe inputs the
//! caller could not turn into something checkable; the runner logs them and
//! treats the input as absent.

use thiserror::Error;

/// Result type alias for policy operations
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors raised while decoding collaborator-supplied data
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Lock file text is not valid YAML
    #[error("Lock file is not valid YAML: {0}")]
    LockYaml(#[from] serde_yaml::Error),

    /// Lock file decoded but a dependency entry has an unexpected shape
    #[error("Malformed dependency entry: {message}")]
    MalformedLock { message: String },
}

impl PolicyError {
    /// Create a malformed-lock error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedLock {
            message: message.into(),
        }
    }
}
