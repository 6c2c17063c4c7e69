//! # Cart Lines and the Document Transform
//!
//! The cart itself is owned by the caller (the order screen's cart store);
//! this module only defines the line shape the core reads and the pure
//! transform that turns cart lines into the canonical line items consumed
//! by the document-creation operations.
//!
//! ## Transform Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  transform_cart(&[CartLine]) -> Vec<DocumentLine>                       │
//! │                                                                         │
//! │  • Pure: no side effects, no hidden state                               │
//! │  • Total: never fails on well-formed input                              │
//! │  • Deterministic: preserves cart order                                  │
//! │  • Idempotent: same cart in, structurally equal lines out               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A line in the shopping cart.
///
/// ## Design Notes
/// - `item_code`: the catalog identifier of the item
/// - `rate`: unit price frozen at the moment the line was added, so the
///   cart displays consistent data even if the catalog price changes
/// - `remarks`: ordered preparation remarks ("no onions", "extra hot"),
///   collected per line by the order screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Item identifier (catalog code).
    pub item_code: String,

    /// Quantity ordered. Positive by construction of the cart UI;
    /// [`crate::validation::validate_quantity`] guards the boundary.
    pub quantity: u32,

    /// Unit price at time of adding (frozen).
    #[ts(type = "number")]
    pub rate: Decimal,

    /// Preparation remarks, in the order they were entered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remarks: Vec<String>,
}

impl CartLine {
    /// Creates a remark-free line.
    pub fn new(item_code: impl Into<String>, quantity: u32, rate: Decimal) -> Self {
        CartLine {
            item_code: item_code.into(),
            quantity,
            rate,
            remarks: Vec::new(),
        }
    }

    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Decimal {
        self.rate * Decimal::from(self.quantity)
    }
}

/// A canonical line item as the document-creation operations expect it.
///
/// The field names are the wire names; the gateway serializes this struct
/// verbatim into create/convert payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentLine {
    /// Item identifier.
    pub item_code: String,

    /// Quantity.
    pub qty: u32,

    /// Unit price.
    #[ts(type = "number")]
    pub rate: Decimal,

    /// Preparation remarks, newline-joined; absent when the line had none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Converts an ordered list of cart lines into document lines.
///
/// Pure and total: well-formed input never fails, order is preserved, and
/// repeated application yields structurally equal output.
pub fn transform_cart(cart: &[CartLine]) -> Vec<DocumentLine> {
    cart.iter()
        .map(|line| DocumentLine {
            item_code: line.item_code.clone(),
            qty: line.quantity,
            rate: line.rate,
            remarks: if line.remarks.is_empty() {
                None
            } else {
                Some(line.remarks.join("\n"))
            },
        })
        .collect()
}
