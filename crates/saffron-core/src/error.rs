//! # Error Types
//!
//! Domain-specific error types for saffron-core.
//!
//! Validation errors are the only failures the pure layer can produce. They
//! are caught before any backend call is made and surfaced inline; nothing
//! here ever reaches the wire.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, limits)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// These occur when the current session state does not meet the
/// preconditions of a submission or payment. Used for early validation
/// before any external operation runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The cart has no lines; there is nothing to submit.
    #[error("Cart is empty")]
    EmptyCart,

    /// The transformed line set is empty.
    #[error("Document must carry at least one line")]
    EmptyLines,

    /// Every tendered amount was filtered out as non-positive.
    #[error("No positive payment amounts were tendered")]
    NothingTendered,

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Shorthand for a missing required field.
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;
