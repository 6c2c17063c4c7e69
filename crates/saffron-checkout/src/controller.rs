//! # Checkout Controller
//!
//! The settlement state machine. Owns the only mutable core state (the
//! settlement phase) and is the only component that mutates the caller's
//! cart or triggers dependent refreshes.
//!
//! ## Flow Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit                                                                 │
//! │    │                                                                    │
//! │    ├── cart empty ────────────────────────► no-op (no state change)    │
//! │    │                                                                    │
//! │    ├── type = Quotation                                                 │
//! │    │     ├── no customer ─────────────────► validation error           │
//! │    │     ├── active quotation ──► CONVERT ─► PaymentPending            │
//! │    │     └── none active ───────► CREATE ──► snapshot + clear → Idle   │
//! │    │                                                                    │
//! │    └── any other type (invoice flow)                                    │
//! │          ├── resolve customer (explicit, else default)                 │
//! │          └── CREATE(Sales Invoice) ────────► PaymentPending            │
//! │                                                                         │
//! │  pay (from PaymentPending only)                                         │
//! │    ├── success ──► Settled ──► clear cart, refresh ──► Idle            │
//! │    └── failure ──► stays PaymentPending (retry keeps the document)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Duplicate-Trigger Guard
//! An atomic busy flag is claimed before any external call and released
//! after the attempt finishes. UI button disabling is advisory only;
//! network latency can outlast render updates, so the flag is the
//! authority. While it is held (or the payment processor is loading),
//! repeated submit/pay triggers return `Ignored` without reaching the
//! backend. This is what guarantees at most one in-flight create/convert
//! per user-triggered submission: create is not idempotent.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use saffron_core::{
    transform_cart, validation::validate_customer, CartLine, DocumentKind, DocumentRef,
    OrderContext, PaymentSet,
};
use saffron_gateway::{
    ConvertQuotationRequest, CreateDocumentRequest, DocumentOutcome, GatewayError,
    SettlementGateway,
};

use crate::payment::{EmptyTenderPolicy, PaymentError, PaymentProcessor, PaymentStatus};
use crate::session::OrderSession;
use crate::snapshot::{render_snapshot, snapshot_file_name, NoopSnapshotWriter, SnapshotWriter};

/// How long the error should stay on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeDuration {
    Standard,
    /// Quotation-conversion failures carry more text; keep them up longer.
    Extended,
}

/// A display-ready error, recorded as state rather than thrown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNotice {
    pub message: String,
    pub duration: NoticeDuration,
}

impl ErrorNotice {
    pub fn standard(message: impl Into<String>) -> Self {
        ErrorNotice {
            message: message.into(),
            duration: NoticeDuration::Standard,
        }
    }

    pub fn extended(message: impl Into<String>) -> Self {
        ErrorNotice {
            message: message.into(),
            duration: NoticeDuration::Extended,
        }
    }
}

/// The settlement phase.
///
/// A document reference is carried exactly while it matters (payment
/// pending / settled); the last error exactly while the phase is Failed.
/// `Failed` is submit-capable: operationally it is Idle plus a notice,
/// and the next attempt clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementPhase {
    #[default]
    Idle,
    Submitting,
    PaymentPending {
        document: DocumentRef,
    },
    Settled {
        document: DocumentRef,
    },
    Failed {
        error: ErrorNotice,
    },
}

impl SettlementPhase {
    /// True when a new submission may start.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SettlementPhase::Idle | SettlementPhase::Failed { .. })
    }

    /// The document currently being settled, if any.
    pub fn document(&self) -> Option<&DocumentRef> {
        match self {
            SettlementPhase::PaymentPending { document } | SettlementPhase::Settled { document } => {
                Some(document)
            }
            _ => None,
        }
    }

    /// The recorded error, present exactly in the Failed phase.
    pub fn last_error(&self) -> Option<&ErrorNotice> {
        match self {
            SettlementPhase::Failed { error } => Some(error),
            _ => None,
        }
    }

    pub fn is_payment_pending(&self) -> bool {
        matches!(self, SettlementPhase::PaymentPending { .. })
    }
}

/// Result of a submit trigger, as a value rather than an error: failures
/// are recorded state, never propagated rejections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Nothing happened: empty cart, a submission already in flight, or a
    /// phase that does not accept submissions.
    Ignored,
    /// Refused locally before any backend call.
    Rejected(ErrorNotice),
    /// A quotation was filed and exported; the flow ended back at Idle.
    QuotationFiled { document: DocumentRef },
    /// A payable invoice exists; the flow is waiting for payment.
    AwaitingPayment { document: DocumentRef },
    /// The backend refused the document operation.
    Failed(ErrorNotice),
}

/// Result of a pay trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleOutcome {
    /// Nothing happened: no payment pending, or one already in flight.
    Ignored,
    /// Refused locally before any backend call.
    Rejected(ErrorNotice),
    /// Payment accepted; cart cleared, state back at Idle.
    Settled { document: DocumentRef },
    /// Payment declined; the document stays pending so payment can be
    /// retried without recreating it.
    Failed(ErrorNotice),
}

/// Orchestrates submission and settlement against an injected session and
/// gateway.
pub struct CheckoutController {
    gateway: Arc<dyn SettlementGateway>,
    session: Arc<dyn OrderSession>,
    snapshot: Arc<dyn SnapshotWriter>,
    payments: PaymentProcessor,
    busy: AtomicBool,
    phase: Mutex<SettlementPhase>,
}

impl CheckoutController {
    pub fn new(gateway: Arc<dyn SettlementGateway>, session: Arc<dyn OrderSession>) -> Self {
        CheckoutController {
            gateway,
            session,
            snapshot: Arc::new(NoopSnapshotWriter),
            payments: PaymentProcessor::new(),
            busy: AtomicBool::new(false),
            phase: Mutex::new(SettlementPhase::Idle),
        }
    }

    /// Attaches the snapshot export capability.
    pub fn with_snapshot_writer(mut self, writer: Arc<dyn SnapshotWriter>) -> Self {
        self.snapshot = writer;
        self
    }

    /// Sets what an empty cleaned payment set means.
    pub fn with_payment_policy(mut self, policy: EmptyTenderPolicy) -> Self {
        self.payments = PaymentProcessor::with_policy(policy);
        self
    }

    /// Current settlement phase (cloned snapshot).
    pub fn phase(&self) -> SettlementPhase {
        self.phase.lock().expect("settlement phase lock poisoned").clone()
    }

    /// Observable status of the payment processor.
    pub fn payment_status(&self) -> PaymentStatus {
        self.payments.status()
    }

    fn set_phase(&self, phase: SettlementPhase) {
        *self.phase.lock().expect("settlement phase lock poisoned") = phase;
    }

    /// Abandons a pending settlement, returning the document that was
    /// awaiting payment. The document itself is NOT rolled back; the
    /// reference is handed back so the caller can resume it later instead
    /// of losing it.
    pub fn abandon(&self) -> Option<DocumentRef> {
        let mut phase = self.phase.lock().expect("settlement phase lock poisoned");
        match &*phase {
            SettlementPhase::PaymentPending { document } => {
                let document = document.clone();
                warn!(document = %document.id, "pending settlement abandoned");
                *phase = SettlementPhase::Idle;
                Some(document)
            }
            _ => None,
        }
    }

    /// Handles the submit trigger.
    ///
    /// An empty cart is a silent no-op: no network call, no state
    /// transition. A repeated trigger while an attempt is in flight is
    /// equally a no-op.
    pub async fn submit(&self) -> SubmitOutcome {
        let cart = self.session.cart();
        if cart.is_empty() {
            return SubmitOutcome::Ignored;
        }

        if self.payments.is_loading() {
            return SubmitOutcome::Ignored;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return SubmitOutcome::Ignored;
        }

        let outcome = self.run_submission(cart).await;
        self.busy.store(false, Ordering::Release);
        outcome
    }

    async fn run_submission(&self, cart: Vec<CartLine>) -> SubmitOutcome {
        {
            let mut phase = self.phase.lock().expect("settlement phase lock poisoned");
            if !phase.accepts_submit() {
                return SubmitOutcome::Ignored;
            }
            // Entering Submitting clears any previous Failed notice.
            *phase = SettlementPhase::Submitting;
        }

        let attempt = Uuid::new_v4();
        let transaction_type = self.session.transaction_type();
        info!(%attempt, transaction_type = %transaction_type, lines = cart.len(), "submission started");

        let outcome = if transaction_type.is_quotation() {
            self.run_quotation_flow(attempt, &cart).await
        } else {
            self.run_invoice_flow(attempt, &cart).await
        };

        match &outcome {
            SubmitOutcome::QuotationFiled { .. } => self.set_phase(SettlementPhase::Idle),
            SubmitOutcome::AwaitingPayment { document } => {
                self.set_phase(SettlementPhase::PaymentPending {
                    document: document.clone(),
                })
            }
            SubmitOutcome::Rejected(notice) | SubmitOutcome::Failed(notice) => {
                self.set_phase(SettlementPhase::Failed {
                    error: notice.clone(),
                })
            }
            SubmitOutcome::Ignored => self.set_phase(SettlementPhase::Idle),
        }

        outcome
    }

    async fn run_quotation_flow(&self, attempt: Uuid, cart: &[CartLine]) -> SubmitOutcome {
        let customer = match validate_customer(self.session.customer().as_deref()) {
            Ok(customer) => customer,
            Err(err) => return SubmitOutcome::Rejected(ErrorNotice::standard(err.to_string())),
        };

        let lines = transform_cart(cart);
        let context = self.order_context(&customer);

        match self.session.active_quotation() {
            // A prior quotation exists: promote it instead of filing a new
            // one. The current cart's lines win over the original draft.
            Some(quotation_id) => {
                let request = ConvertQuotationRequest {
                    quotation_id,
                    lines,
                    context,
                };

                match self.gateway.convert_quotation(&request).await {
                    Ok(DocumentOutcome::Completed { document }) => {
                        info!(%attempt, document = %document.id, "quotation converted to sales invoice");
                        SubmitOutcome::AwaitingPayment { document }
                    }
                    Ok(DocumentOutcome::Rejected { message }) => {
                        warn!(%attempt, quotation = %request.quotation_id, %message, "quotation conversion rejected");
                        SubmitOutcome::Failed(ErrorNotice::extended(message))
                    }
                    Err(err) => {
                        error!(%attempt, quotation = %request.quotation_id, %err, "quotation conversion failed");
                        SubmitOutcome::Failed(ErrorNotice::extended(convert_failure_message(&err)))
                    }
                }
            }
            None => {
                let request = CreateDocumentRequest {
                    kind: DocumentKind::Quotation,
                    lines,
                    context,
                };

                match self.gateway.create_document(&request).await {
                    Ok(DocumentOutcome::Completed { document }) => {
                        info!(%attempt, document = %document.id, "quotation filed");
                        self.export_quotation_snapshot(&document).await;
                        self.finish_success().await;
                        SubmitOutcome::QuotationFiled { document }
                    }
                    Ok(DocumentOutcome::Rejected { message }) => {
                        warn!(%attempt, %message, "quotation creation rejected");
                        SubmitOutcome::Failed(ErrorNotice::standard(message))
                    }
                    Err(err) => {
                        error!(%attempt, %err, "quotation creation failed");
                        SubmitOutcome::Failed(ErrorNotice::standard(err.to_string()))
                    }
                }
            }
        }
    }

    async fn run_invoice_flow(&self, attempt: Uuid, cart: &[CartLine]) -> SubmitOutcome {
        let customer = match self.resolve_customer().await {
            Ok(customer) => customer,
            Err(notice) => return SubmitOutcome::Rejected(notice),
        };

        let request = CreateDocumentRequest {
            kind: DocumentKind::SalesInvoice,
            lines: transform_cart(cart),
            context: self.order_context(&customer),
        };

        match self.gateway.create_document(&request).await {
            Ok(DocumentOutcome::Completed { document }) => {
                info!(%attempt, document = %document.id, "sales invoice created");
                SubmitOutcome::AwaitingPayment { document }
            }
            Ok(DocumentOutcome::Rejected { message }) => {
                warn!(%attempt, %message, "sales invoice creation rejected");
                SubmitOutcome::Failed(ErrorNotice::standard(message))
            }
            Err(err) => {
                error!(%attempt, %err, "sales invoice creation failed");
                SubmitOutcome::Failed(ErrorNotice::standard(err.to_string()))
            }
        }
    }

    /// Handles the pay trigger. Valid only while a settlement is pending;
    /// a failure leaves the pending document in place so payment can be
    /// retried without recreating it.
    pub async fn settle(&self, payments: &PaymentSet) -> SettleOutcome {
        let document = match &self.phase() {
            SettlementPhase::PaymentPending { document } => document.clone(),
            _ => return SettleOutcome::Ignored,
        };

        if self.payments.is_loading() {
            return SettleOutcome::Ignored;
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return SettleOutcome::Ignored;
        }

        let outcome = self.run_settlement(document, payments).await;
        self.busy.store(false, Ordering::Release);
        outcome
    }

    async fn run_settlement(&self, document: DocumentRef, payments: &PaymentSet) -> SettleOutcome {
        let customer = match self.resolve_customer().await {
            Ok(customer) => customer,
            Err(notice) => return SettleOutcome::Rejected(notice),
        };

        match self
            .payments
            .submit(self.gateway.as_ref(), &customer, payments)
            .await
        {
            Ok(_) => {
                info!(document = %document.id, "settlement complete");
                self.set_phase(SettlementPhase::Settled {
                    document: document.clone(),
                });
                self.finish_success().await;
                // Settled is terminal; collapse to Idle for the next order.
                self.set_phase(SettlementPhase::Idle);
                SettleOutcome::Settled { document }
            }
            Err(PaymentError::Busy) => SettleOutcome::Ignored,
            Err(PaymentError::Validation(err)) => {
                SettleOutcome::Rejected(ErrorNotice::standard(err.to_string()))
            }
            Err(PaymentError::Declined(message)) => {
                // Phase stays PaymentPending: the document survives for a
                // retried payment.
                SettleOutcome::Failed(ErrorNotice::standard(message))
            }
        }
    }

    /// Explicit customer selection, else the organization's default
    /// customer. Neither resolving is a validation failure surfaced before
    /// the document/payment operation runs.
    async fn resolve_customer(&self) -> Result<String, ErrorNotice> {
        if let Ok(customer) = validate_customer(self.session.customer().as_deref()) {
            return Ok(customer);
        }

        match self.gateway.default_customer().await {
            Ok(Some(customer)) if !customer.trim().is_empty() => Ok(customer),
            Ok(_) => Err(ErrorNotice::standard("customer is required")),
            Err(err) => {
                warn!(%err, "default customer lookup failed");
                Err(ErrorNotice::standard(err.to_string()))
            }
        }
    }

    fn order_context(&self, customer: &str) -> OrderContext {
        OrderContext {
            customer: customer.to_string(),
            customer_name: self
                .session
                .customer_name()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| customer.to_string()),
            order_kind: self.session.order_kind().unwrap_or_default(),
            table: self.session.active_table(),
            waiter: self.session.active_waiter(),
        }
    }

    /// Fetches and hands off the quotation snapshot artifact. Non-fatal:
    /// the document already exists server-side, so a failed export only
    /// logs.
    async fn export_quotation_snapshot(&self, document: &DocumentRef) {
        match self.gateway.quotation_snapshot(&document.id).await {
            Ok(body) => {
                self.snapshot
                    .save(&snapshot_file_name(&document.id), &render_snapshot(&body));
            }
            Err(err) => {
                warn!(document = %document.id, %err, "quotation snapshot export failed");
            }
        }
    }

    /// Shared success epilogue: clear the cart, then refresh the order
    /// list and, when a table is active, its per-table orders.
    async fn finish_success(&self) {
        self.session.clear_cart();
        self.session.refresh_orders().await;
        if let Some(table) = self.session.active_table() {
            self.session.refresh_table_orders(&table).await;
        }
    }
}

/// Conversion failures fold structured detail into one line; transport
/// errors speak for themselves.
fn convert_failure_message(err: &GatewayError) -> String {
    match err {
        GatewayError::Rejected(detail) => detail.display("Failed to convert quotation"),
        other => other.to_string(),
    }
}
