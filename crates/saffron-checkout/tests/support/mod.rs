//! Shared test doubles: a scripted in-memory gateway, a fake order
//! session, and a collecting snapshot writer.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Semaphore;

use saffron_core::{
    CartLine, OrderKind, PaymentSet, TransactionType, TransactionTypeProfile,
};
use saffron_gateway::{
    ConvertQuotationRequest, CreateDocumentRequest, DocumentOutcome, ExchangeQuote, GatewayResult,
    PaymentReceipt, SettlementGateway,
};

use saffron_checkout::session::OrderSession;
use saffron_checkout::snapshot::SnapshotWriter;

/// Makes controller tracing visible under `RUST_LOG`; safe to call from
/// every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// =============================================================================
// Scripted gateway
// =============================================================================

/// A gateway whose replies are queued by the test. Every call is recorded
/// so tests can assert on exactly what reached the backend.
#[derive(Default)]
pub struct ScriptedGateway {
    pub base_currency_reply: Mutex<Option<GatewayResult<String>>>,
    pub base_currency_calls: AtomicUsize,
    pub exchange_replies: Mutex<VecDeque<GatewayResult<Vec<ExchangeQuote>>>>,
    pub create_replies: Mutex<VecDeque<GatewayResult<DocumentOutcome>>>,
    pub convert_replies: Mutex<VecDeque<GatewayResult<DocumentOutcome>>>,
    pub payment_replies: Mutex<VecDeque<GatewayResult<PaymentReceipt>>>,
    pub default_customer_reply: Mutex<Option<GatewayResult<Option<String>>>>,
    pub types_reply: Mutex<Option<GatewayResult<TransactionTypeProfile>>>,
    pub snapshot_reply: Mutex<Option<GatewayResult<serde_json::Value>>>,

    pub create_calls: Mutex<Vec<CreateDocumentRequest>>,
    pub convert_calls: Mutex<Vec<ConvertQuotationRequest>>,
    pub payment_calls: Mutex<Vec<(String, PaymentSet)>>,

    /// When set, create_document blocks on this semaphore after recording
    /// the call, letting tests hold a submission in flight.
    pub create_gate: Mutex<Option<Arc<Semaphore>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_base_currency(&self, reply: GatewayResult<String>) {
        *self.base_currency_reply.lock().unwrap() = Some(reply);
    }

    pub fn script_exchange(&self, reply: GatewayResult<Vec<ExchangeQuote>>) {
        self.exchange_replies.lock().unwrap().push_back(reply);
    }

    pub fn script_create(&self, reply: GatewayResult<DocumentOutcome>) {
        self.create_replies.lock().unwrap().push_back(reply);
    }

    pub fn script_convert(&self, reply: GatewayResult<DocumentOutcome>) {
        self.convert_replies.lock().unwrap().push_back(reply);
    }

    pub fn script_payment(&self, reply: GatewayResult<PaymentReceipt>) {
        self.payment_replies.lock().unwrap().push_back(reply);
    }

    pub fn script_default_customer(&self, reply: GatewayResult<Option<String>>) {
        *self.default_customer_reply.lock().unwrap() = Some(reply);
    }

    pub fn script_types(&self, reply: GatewayResult<TransactionTypeProfile>) {
        *self.types_reply.lock().unwrap() = Some(reply);
    }

    pub fn gate_create(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.create_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn create_call_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }

    pub fn convert_call_count(&self) -> usize {
        self.convert_calls.lock().unwrap().len()
    }

    pub fn payment_call_count(&self) -> usize {
        self.payment_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SettlementGateway for ScriptedGateway {
    async fn base_currency(&self) -> GatewayResult<String> {
        self.base_currency_calls.fetch_add(1, Ordering::SeqCst);
        self.base_currency_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok("USD".to_string()))
    }

    async fn exchange_rates(&self, _base: &str) -> GatewayResult<Vec<ExchangeQuote>> {
        self.exchange_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted exchange reply")
    }

    async fn create_document(
        &self,
        request: &CreateDocumentRequest,
    ) -> GatewayResult<DocumentOutcome> {
        self.create_calls.lock().unwrap().push(request.clone());

        let gate = self.create_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        self.create_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted create reply")
    }

    async fn convert_quotation(
        &self,
        request: &ConvertQuotationRequest,
    ) -> GatewayResult<DocumentOutcome> {
        self.convert_calls.lock().unwrap().push(request.clone());
        self.convert_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted convert reply")
    }

    async fn submit_payment(
        &self,
        customer: &str,
        payments: &PaymentSet,
    ) -> GatewayResult<PaymentReceipt> {
        self.payment_calls
            .lock()
            .unwrap()
            .push((customer.to_string(), payments.clone()));
        self.payment_replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted payment reply")
    }

    async fn default_customer(&self) -> GatewayResult<Option<String>> {
        self.default_customer_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(None))
    }

    async fn transaction_types(&self) -> GatewayResult<TransactionTypeProfile> {
        self.types_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(TransactionTypeProfile::well_known()))
    }

    async fn quotation_snapshot(&self, document_id: &str) -> GatewayResult<serde_json::Value> {
        self.snapshot_reply
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(serde_json::json!({ "name": document_id })))
    }
}

// =============================================================================
// Fake session
// =============================================================================

/// In-memory stand-in for the order screen's stores.
pub struct FakeSession {
    pub cart: Mutex<Vec<CartLine>>,
    pub transaction_type: Mutex<TransactionType>,
    pub customer: Mutex<Option<String>>,
    pub customer_name: Mutex<Option<String>>,
    pub order_kind: Mutex<Option<OrderKind>>,
    pub table: Mutex<Option<String>>,
    pub waiter: Mutex<Option<String>>,
    pub quotation: Mutex<Option<String>>,

    pub clear_count: AtomicUsize,
    pub order_refreshes: AtomicUsize,
    pub table_refreshes: Mutex<Vec<String>>,
}

impl FakeSession {
    pub fn invoice(cart: Vec<CartLine>, customer: Option<&str>) -> Self {
        FakeSession {
            cart: Mutex::new(cart),
            transaction_type: Mutex::new(TransactionType::sales_invoice()),
            customer: Mutex::new(customer.map(str::to_string)),
            customer_name: Mutex::new(None),
            order_kind: Mutex::new(None),
            table: Mutex::new(None),
            waiter: Mutex::new(None),
            quotation: Mutex::new(None),
            clear_count: AtomicUsize::new(0),
            order_refreshes: AtomicUsize::new(0),
            table_refreshes: Mutex::new(Vec::new()),
        }
    }

    pub fn quotation(cart: Vec<CartLine>, customer: Option<&str>) -> Self {
        let session = Self::invoice(cart, customer);
        *session.transaction_type.lock().unwrap() = TransactionType::quotation();
        session
    }

    pub fn with_active_quotation(self, id: &str) -> Self {
        *self.quotation.lock().unwrap() = Some(id.to_string());
        self
    }

    pub fn with_table(self, id: &str) -> Self {
        *self.table.lock().unwrap() = Some(id.to_string());
        self
    }

    pub fn cleared(&self) -> usize {
        self.clear_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderSession for FakeSession {
    fn cart(&self) -> Vec<CartLine> {
        self.cart.lock().unwrap().clone()
    }

    fn transaction_type(&self) -> TransactionType {
        self.transaction_type.lock().unwrap().clone()
    }

    fn customer(&self) -> Option<String> {
        self.customer.lock().unwrap().clone()
    }

    fn customer_name(&self) -> Option<String> {
        self.customer_name.lock().unwrap().clone()
    }

    fn order_kind(&self) -> Option<OrderKind> {
        *self.order_kind.lock().unwrap()
    }

    fn active_table(&self) -> Option<String> {
        self.table.lock().unwrap().clone()
    }

    fn active_waiter(&self) -> Option<String> {
        self.waiter.lock().unwrap().clone()
    }

    fn active_quotation(&self) -> Option<String> {
        self.quotation.lock().unwrap().clone()
    }

    fn clear_cart(&self) {
        self.cart.lock().unwrap().clear();
        self.clear_count.fetch_add(1, Ordering::SeqCst);
    }

    async fn refresh_orders(&self) {
        self.order_refreshes.fetch_add(1, Ordering::SeqCst);
    }

    async fn refresh_table_orders(&self, table_id: &str) {
        self.table_refreshes.lock().unwrap().push(table_id.to_string());
    }
}

// =============================================================================
// Snapshot writer
// =============================================================================

#[derive(Default)]
pub struct CollectingSnapshotWriter {
    pub saved: Mutex<Vec<(String, String)>>,
}

impl SnapshotWriter for CollectingSnapshotWriter {
    fn save(&self, file_name: &str, contents: &str) {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents.to_string()));
    }
}

// =============================================================================
// Builders
// =============================================================================

/// The canonical test cart: two teas at 5.00 each.
pub fn tea_cart() -> Vec<CartLine> {
    vec![CartLine::new("TEA", 2, Decimal::from(5))]
}

pub fn payments(entries: &[(&str, Decimal)]) -> PaymentSet {
    let mut set = PaymentSet::new();
    for (currency, amount) in entries {
        set.tender(*currency, *amount);
    }
    set
}
