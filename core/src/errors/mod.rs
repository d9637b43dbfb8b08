//! Domain-specific error types and error handling.

mod types;


pub use types::ValidationError;

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    /// The mail transport rejected or failed to deliver the message
    #[error("Mail delivery failed: {message}")]
    Delivery { message: String },

    /// The OTP store failed to persist, read, or delete a record
    #[error("Storage error: {message}")]
    Storage { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the caller supplied bad input (as opposed to a backend fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::ValidationErr(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
