//! # saffron-checkout: Submission & Settlement Orchestration
//!
//! Drives the whole settlement pipeline: cart → persisted commercial
//! document (quotation or sales invoice) → multi-currency payment → cart
//! cleared. Everything here is triggered by discrete user actions (submit,
//! pay); there are no background workers.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            submit                create/convert ok                      │
//! │   Idle ───────────► Submitting ─────────────────► PaymentPending        │
//! │    ▲                    │                              │    ▲           │
//! │    │   quotation filed  │ failure                 pay  │    │ payment   │
//! │    │◄───────────────────┤                              │    │ failure   │
//! │    │                    ▼                              ▼    │ (retry)   │
//! │    │                 Failed ◄──(submit-capable)     Settled ┘           │
//! │    │                                                   │               │
//! │    └───────────────────────────────────────────────────┘               │
//! │                       cart cleared, dependents refreshed               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`controller`] - the CheckoutController state machine
//! - [`payment`] - multi-currency payment processor with tri-state status
//! - [`rates`] - session-scoped exchange-rate cache
//! - [`session`] - the injected order-session context trait
//! - [`snapshot`] - quotation snapshot export capability
//! - [`transaction_types`] - per-user transaction-type loading

pub mod controller;
pub mod payment;
pub mod rates;
pub mod session;
pub mod snapshot;
pub mod transaction_types;

pub use controller::{
    CheckoutController, ErrorNotice, NoticeDuration, SettleOutcome, SettlementPhase, SubmitOutcome,
};
pub use payment::{EmptyTenderPolicy, PaymentError, PaymentProcessor, PaymentStatus};
pub use rates::ExchangeRateCache;
pub use session::OrderSession;
pub use snapshot::{NoopSnapshotWriter, SnapshotWriter};
pub use transaction_types::load_transaction_types;
