//! # saffron-gateway: External Backend Contract
//!
//! The settlement flow consumes a handful of operations from an external
//! backend: document creation and conversion, multi-currency payment,
//! currency reference data, and a few per-user lookups. This crate defines
//! that contract once as the [`SettlementGateway`] trait, owns the wire
//! DTOs, and normalizes every response into a single outcome shape at the
//! boundary.
//!
//! ## Why a trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  saffron-checkout ──► dyn SettlementGateway ──┬──► HttpGateway (prod)  │
//! │                                               └──► scripted fake (test)│
//! │                                                                         │
//! │  The orchestration layer never sees a raw response body. Create        │
//! │  returns `{name}`, convert returns `{success, sales_invoice}`, payment │
//! │  returns `{success, message?}` - all folded into DocumentOutcome /     │
//! │  PaymentReceipt right here, so no downstream code branches on shape.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod gateway;
pub mod http;
pub mod types;

pub use error::{GatewayError, GatewayResult};
pub use gateway::SettlementGateway;
pub use http::{GatewayConfig, HttpGateway};
pub use types::{
    ConvertQuotationRequest, CreateDocumentRequest, DocumentOutcome, ExchangeQuote, FailureDetail,
    PaymentReceipt,
};
