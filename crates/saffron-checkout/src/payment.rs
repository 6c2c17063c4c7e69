//! # Multi-Currency Payment Processor
//!
//! Cleans a currency→amount mapping, submits it for a customer, and
//! interprets the reply. Success requires the backend's explicit success
//! flag; a clean HTTP exchange with `success == false` is still a declined
//! payment.
//!
//! ## Observable Status
//! The processor exposes a tri-state status (idle/loading, error, success)
//! so the order screen can gate its payment dialog without polling. The
//! loading state doubles as the busy guard: a second submit while one is
//! in flight is refused before any network call.

use std::sync::Mutex;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use saffron_core::{PaymentSet, ValidationError};
use saffron_gateway::{GatewayError, PaymentReceipt, SettlementGateway};

/// Fallback display message when the backend gives us nothing usable.
const GENERIC_FAILURE: &str = "Something went wrong";

/// What the order screen sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Idle,
    Loading,
    /// Last submission failed; display-ready message.
    Failed(String),
    Succeeded,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Idle
    }
}

/// What an empty payment set (after cleaning) means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyTenderPolicy {
    /// Forward it: a zero-payment submission is a valid "defer payment"
    /// action the backend knows how to record.
    #[default]
    Forward,
    /// Refuse it locally with a validation error, before any network call.
    Reject,
}

/// Payment submission failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// A submission is already in flight; this one was not dispatched.
    #[error("payment already in progress")]
    Busy,

    /// Refused locally before any network call.
    #[error("{0}")]
    Validation(ValidationError),

    /// The backend declined the payment or the call failed.
    #[error("{0}")]
    Declined(String),
}

/// Submits multi-currency payments and tracks their observable status.
#[derive(Debug, Default)]
pub struct PaymentProcessor {
    status: Mutex<PaymentStatus>,
    policy: EmptyTenderPolicy,
}

impl PaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: EmptyTenderPolicy) -> Self {
        PaymentProcessor {
            status: Mutex::new(PaymentStatus::Idle),
            policy,
        }
    }

    /// Current observable status.
    pub fn status(&self) -> PaymentStatus {
        self.status.lock().expect("payment status lock poisoned").clone()
    }

    /// True while a submission is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.status(), PaymentStatus::Loading)
    }

    fn set_status(&self, status: PaymentStatus) {
        *self.status.lock().expect("payment status lock poisoned") = status;
    }

    /// Attempts to move Idle/Failed/Succeeded → Loading. Refuses when a
    /// submission is already in flight.
    fn begin(&self) -> Result<(), PaymentError> {
        let mut status = self.status.lock().expect("payment status lock poisoned");
        if matches!(*status, PaymentStatus::Loading) {
            return Err(PaymentError::Busy);
        }
        *status = PaymentStatus::Loading;
        Ok(())
    }

    /// Cleans and submits a payment for `customer`.
    ///
    /// The mapping actually sent contains exactly the entries with amount
    /// > 0; what an empty cleaned mapping means is decided by the
    /// configured [`EmptyTenderPolicy`].
    pub async fn submit(
        &self,
        gateway: &dyn SettlementGateway,
        customer: &str,
        payments: &PaymentSet,
    ) -> Result<PaymentReceipt, PaymentError> {
        self.begin()?;

        let cleaned = payments.cleaned();

        if cleaned.is_empty() && self.policy == EmptyTenderPolicy::Reject {
            let err = ValidationError::NothingTendered;
            self.set_status(PaymentStatus::Failed(err.to_string()));
            return Err(PaymentError::Validation(err));
        }

        match gateway.submit_payment(customer, &cleaned).await {
            Ok(receipt) if receipt.success => {
                info!(customer, currencies = cleaned.len(), "payment accepted");
                self.set_status(PaymentStatus::Succeeded);
                Ok(receipt)
            }
            Ok(receipt) => {
                // Transport succeeded, business outcome did not.
                let message = receipt
                    .message
                    .clone()
                    .unwrap_or_else(|| "Payment failed".to_string());
                warn!(customer, %message, "payment declined");
                self.set_status(PaymentStatus::Failed(message.clone()));
                Err(PaymentError::Declined(message))
            }
            Err(err) => {
                let message = display_message(&err);
                warn!(customer, %err, "payment submission failed");
                self.set_status(PaymentStatus::Failed(message.clone()));
                Err(PaymentError::Declined(message))
            }
        }
    }
}

/// Display-message precedence for failed payment calls: structured
/// `details`, else the structured `message`, else whatever the transport
/// error says for itself, else a generic fallback.
fn display_message(err: &GatewayError) -> String {
    match err {
        GatewayError::Rejected(detail) => detail
            .details
            .clone()
            .or_else(|| detail.message.clone())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        GatewayError::Status { .. } | GatewayError::InvalidResponse(_) => {
            GENERIC_FAILURE.to_string()
        }
        other => other.to_string(),
    }
}
