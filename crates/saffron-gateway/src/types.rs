//! # Wire Types and Normalization
//!
//! Request payloads the gateway sends, the raw reply shapes the backend
//! answers with, and the normalized outcome types everything above this
//! crate consumes.
//!
//! ## Normalization Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Backend reply                      Normalized to                       │
//! │  ────────────────────────────────   ──────────────────────────────────  │
//! │  create:  {name}                    DocumentOutcome::Completed          │
//! │           {error} / {message}       DocumentOutcome::Rejected           │
//! │  convert: {success, sales_invoice}  DocumentOutcome::Completed          │
//! │           {message,details?,        DocumentOutcome::Rejected with      │
//! │            error_type?}             "message[: details][ (error_type)]" │
//! │  payment: {success, message?}       PaymentReceipt (flag kept verbatim; │
//! │                                     interpreting it is the processor's  │
//! │                                     job, not the gateway's)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saffron_core::{DocumentKind, DocumentLine, DocumentRef, OrderContext};

// =============================================================================
// Requests
// =============================================================================

/// Payload for creating a new document of either kind.
///
/// The customer travels inside the order context; lines must already be
/// transformed (the gateway never reads cart lines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    pub kind: DocumentKind,
    pub lines: Vec<DocumentLine>,
    #[serde(flatten)]
    pub context: OrderContext,
}

/// Payload for promoting an existing quotation into a sales invoice.
///
/// The supplied lines win over the original draft's lines: the caller's
/// current cart is the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertQuotationRequest {
    pub quotation_id: String,
    pub lines: Vec<DocumentLine>,
    #[serde(flatten)]
    pub context: OrderContext,
}

// =============================================================================
// Normalized outcomes
// =============================================================================

/// Unified result of a create or convert operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// The backend persisted the document and assigned its identifier.
    Completed { document: DocumentRef },
    /// The backend rejected the operation for a business reason
    /// (validation, insufficient stock, already converted, ...). The
    /// message is display-ready.
    Rejected { message: String },
}

/// Raw payment reply. `success` is an explicit flag: a 2xx transport
/// result with `success == false` is still a failed payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// One currency-exchange record as the backend stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    pub from_currency: String,
    pub to_currency: String,
    pub exchange_rate: Decimal,
}

// =============================================================================
// Failure detail
// =============================================================================

/// Structured failure detail a rejected operation may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl FailureDetail {
    /// Folds the detail into a single display string:
    /// `message[: details][ (error_type)]`, with `fallback` standing in
    /// for an absent message.
    pub fn display(&self, fallback: &str) -> String {
        let mut out = self
            .message
            .clone()
            .unwrap_or_else(|| fallback.to_string());
        if let Some(details) = &self.details {
            out.push_str(": ");
            out.push_str(details);
        }
        if let Some(error_type) = &self.error_type {
            out.push_str(&format!(" ({})", error_type));
        }
        out
    }

    /// True when the backend sent nothing usable.
    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.details.is_none() && self.error_type.is_none()
    }
}

// =============================================================================
// Raw reply shapes (private to the normalization step)
// =============================================================================

/// Create reply: `{name}` on success; some backends answer a business
/// failure with 200 and `{error}` instead of an error status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreateDocumentReply {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl CreateDocumentReply {
    pub(crate) fn into_outcome(self, kind: DocumentKind) -> DocumentOutcome {
        match self.name {
            Some(id) => DocumentOutcome::Completed {
                document: DocumentRef::created(kind, id),
            },
            None => DocumentOutcome::Rejected {
                message: self
                    .error
                    .or(self.message)
                    .unwrap_or_else(|| format!("{} creation failed", kind)),
            },
        }
    }
}

/// Convert reply: `{success, sales_invoice}` or failure detail.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConvertQuotationReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub sales_invoice: Option<String>,
    #[serde(flatten)]
    pub detail: FailureDetail,
}

impl ConvertQuotationReply {
    pub(crate) fn into_outcome(self) -> DocumentOutcome {
        match (self.success, self.sales_invoice) {
            (true, Some(id)) => DocumentOutcome::Completed {
                document: DocumentRef::converted(id),
            },
            _ => DocumentOutcome::Rejected {
                message: self.detail.display("Failed to convert quotation"),
            },
        }
    }
}

/// Base-currency reply; a missing value falls back to USD.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BaseCurrencyReply {
    #[serde(default)]
    pub currency: Option<String>,
}

/// Default-customer reply.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DefaultCustomerReply {
    #[serde(default)]
    pub customer: Option<String>,
}
