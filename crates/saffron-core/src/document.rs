//! # Document Types
//!
//! Identity types for the commercial documents the settlement flow creates
//! and the per-submission order context that accompanies them.
//!
//! ## Dual Document Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Quotation        deferred, unpaid draft; exported as a snapshot file  │
//! │  Sales Invoice    payable document; enters the payment-pending phase   │
//! │                                                                         │
//! │  A Quotation can later be CONVERTED into a Sales Invoice, carrying      │
//! │  the cart's current lines (the cart wins over the original draft).      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The kind of commercial document a submission produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DocumentKind {
    /// Deferred, unpaid draft. Never enters payment pending.
    Quotation,
    /// Payable document; settlement collects against it.
    #[serde(rename = "Sales Invoice")]
    SalesInvoice,
}

impl DocumentKind {
    /// Wire/display name of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "Quotation",
            DocumentKind::SalesInvoice => "Sales Invoice",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a server-persisted document.
///
/// Created by the gateway when a create/convert call succeeds; consumed by
/// the payment step; discarded once settlement completes or the flow is
/// abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentRef {
    /// Document kind.
    pub kind: DocumentKind,

    /// Server-assigned identifier (e.g. "SINV-0001").
    pub id: String,

    /// True when this document came out of a quotation conversion.
    pub converted_from_quotation: bool,
}

impl DocumentRef {
    /// A freshly created document.
    pub fn created(kind: DocumentKind, id: impl Into<String>) -> Self {
        DocumentRef {
            kind,
            id: id.into(),
            converted_from_quotation: false,
        }
    }

    /// A sales invoice produced by converting an existing quotation.
    pub fn converted(id: impl Into<String>) -> Self {
        DocumentRef {
            kind: DocumentKind::SalesInvoice,
            id: id.into(),
            converted_from_quotation: true,
        }
    }
}

/// How the order is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderKind {
    #[serde(rename = "Dine In")]
    DineIn,
    #[serde(rename = "Take Away")]
    TakeAway,
}

impl Default for OrderKind {
    /// Orders with no explicit kind are treated as take-away.
    fn default() -> Self {
        OrderKind::TakeAway
    }
}

impl OrderKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderKind::DineIn => "Dine In",
            OrderKind::TakeAway => "Take Away",
        }
    }
}

/// Per-submission order context.
///
/// Constructed from current session state for each submission attempt;
/// never persisted by the core. The active quotation id is carried
/// separately by the flow because it selects the convert path rather than
/// being document payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderContext {
    /// Customer identifier. Required, non-empty.
    pub customer: String,

    /// Customer display name. Falls back to the identifier when the
    /// session has no separate display name.
    pub customer_name: String,

    /// How the order is served.
    pub order_kind: OrderKind,

    /// Active table, when the order is attached to one.
    pub table: Option<String>,

    /// Active waiter/agent, when one is assigned.
    pub waiter: Option<String>,
}
