//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A validation error in an incoming event.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),

    /// The operation was cancelled while waiting between attempts.
    #[error("operation '{operation}' was cancelled")]
    Cancelled {
        /// The name of the cancelled operation.
        operation: String,
    },

    /// Every attempt of a retried operation failed.
    #[error("operation '{operation}' failed after {attempts} attempts")]
    RetryExhausted {
        /// The name of the retried operation.
        operation: String,
        /// How many times the operation was invoked.
        attempts: u32,
        /// The error returned by the final attempt.
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Returns `true` for the error kinds an event handler is allowed to
    /// surface to the delivery layer.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::RetryExhausted { .. })
    }
}
