//! # Validation Module
//!
//! Pre-submission validation rules. Everything here runs before any
//! backend operation is dispatched; a failed check never reaches the wire.
//!
//! ## Usage
//! ```rust
//! use saffron_core::validation::{validate_customer, validate_quantity};
//!
//! assert!(validate_customer(Some("CUST-001")).is_ok());
//! assert!(validate_quantity(5).is_ok());
//! ```

use rust_decimal::Decimal;

use crate::cart::DocumentLine;
use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

/// Validates the customer selection.
///
/// ## Rules
/// - Must be present and non-empty after trimming
///
/// Returns the trimmed identifier.
pub fn validate_customer(customer: Option<&str>) -> ValidationResult<String> {
    let customer = customer.map(str::trim).unwrap_or_default();

    if customer.is_empty() {
        return Err(ValidationError::required("customer"));
    }

    Ok(customer.to_string())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (complimentary items)
pub fn validate_rate(rate: Decimal) -> ValidationResult<()> {
    if rate < Decimal::ZERO {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the transformed line set of a document operation.
pub fn validate_lines(lines: &[DocumentLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::EmptyLines);
    }

    Ok(())
}

/// Validates the cart size before another line is added.
///
/// ## Rules
/// - Must stay below MAX_CART_LINES (100)
pub fn validate_cart_size(current_lines: usize) -> ValidationResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 0,
            max: MAX_CART_LINES as i64,
        });
    }

    Ok(())
}

/// Validates a currency code's shape.
///
/// ## Rules
/// - Three ASCII letters (ISO 4217 style), e.g. "USD"
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a three-letter code".to_string(),
        });
    }

    Ok(())
}
