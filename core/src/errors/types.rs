//! Input validation error types

use thiserror::Error;

/// Validation errors
///
/// These errors represent input validation failures. The transport layer
/// decides how each one is worded for the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },
}

impl ValidationError {
    /// Shorthand for a missing or blank field
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField { field: field.into() }
    }
}
