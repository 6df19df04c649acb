//! Domain validation errors

use thiserror::Error;

/// Errors raised when a tracked entry violates the registry invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is missing or empty
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A field holds a value that cannot be used
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Field name as it appears in the registry document
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}
