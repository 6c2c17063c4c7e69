//! # The Settlement Gateway Contract
//!
//! One trait method per operation the settlement flow consumes. The flow
//! layer holds a `dyn SettlementGateway`, so production code talks HTTP
//! while tests script replies in memory.

use async_trait::async_trait;

use saffron_core::{PaymentSet, TransactionTypeProfile};

use crate::error::GatewayResult;
use crate::types::{
    ConvertQuotationRequest, CreateDocumentRequest, DocumentOutcome, ExchangeQuote, PaymentReceipt,
};

/// Operations consumed from the external backend.
///
/// ## Contract Notes
/// - `create_document` is NOT idempotent: calling it twice creates two
///   documents. The caller must guarantee at most one in-flight create per
///   user-triggered submission.
/// - `convert_quotation` carries the caller's current lines; they override
///   the original draft's lines.
/// - `submit_payment` expects an already-cleaned payment set; an empty set
///   is a valid "defer payment" submission.
/// - Once dispatched, a create/convert is never rolled back by this layer.
#[async_trait]
pub trait SettlementGateway: Send + Sync {
    /// The organization's configured base currency code.
    async fn base_currency(&self) -> GatewayResult<String>;

    /// All currency-exchange records whose source currency equals `base`.
    async fn exchange_rates(&self, base: &str) -> GatewayResult<Vec<ExchangeQuote>>;

    /// Persists a new document (quotation or sales invoice) server-side.
    async fn create_document(
        &self,
        request: &CreateDocumentRequest,
    ) -> GatewayResult<DocumentOutcome>;

    /// Promotes an existing quotation into a sales invoice.
    async fn convert_quotation(
        &self,
        request: &ConvertQuotationRequest,
    ) -> GatewayResult<DocumentOutcome>;

    /// Submits a multi-currency payment for `customer`.
    async fn submit_payment(
        &self,
        customer: &str,
        payments: &PaymentSet,
    ) -> GatewayResult<PaymentReceipt>;

    /// The walk-in/default customer, when the organization configured one.
    async fn default_customer(&self) -> GatewayResult<Option<String>>;

    /// The transaction types the current user may run.
    async fn transaction_types(&self) -> GatewayResult<TransactionTypeProfile>;

    /// Full JSON representation of a created quotation, for the
    /// downloadable snapshot artifact.
    async fn quotation_snapshot(&self, document_id: &str) -> GatewayResult<serde_json::Value>;
}
