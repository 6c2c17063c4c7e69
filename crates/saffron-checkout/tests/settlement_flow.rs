//! Submission-flow scenarios: which backend operation runs, what state
//! the controller ends in, and when the cart is (not) cleared.

mod support;

use std::sync::Arc;
use std::time::Duration;

use saffron_core::{DocumentKind, DocumentRef};
use saffron_gateway::{DocumentOutcome, FailureDetail, GatewayError};

use saffron_checkout::{
    CheckoutController, NoticeDuration, SettlementPhase, SubmitOutcome,
};

use support::{init_tracing, tea_cart, CollectingSnapshotWriter, FakeSession, ScriptedGateway};

fn controller(
    gateway: Arc<ScriptedGateway>,
    session: Arc<FakeSession>,
) -> CheckoutController {
    CheckoutController::new(gateway, session)
}

#[tokio::test]
async fn invoice_submission_reaches_payment_pending() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_create(Ok(DocumentOutcome::Completed {
        document: DocumentRef::created(DocumentKind::SalesInvoice, "SINV-0001"),
    }));
    let session = Arc::new(FakeSession::invoice(tea_cart(), Some("CUST-001")));
    let controller = controller(gateway.clone(), session.clone());

    let outcome = controller.submit().await;

    // The create call carried the transformed cart verbatim.
    let calls = gateway.create_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].kind, DocumentKind::SalesInvoice);
    assert_eq!(calls[0].context.customer, "CUST-001");
    assert_eq!(calls[0].lines.len(), 1);
    assert_eq!(calls[0].lines[0].item_code, "TEA");
    assert_eq!(calls[0].lines[0].qty, 2);
    assert_eq!(calls[0].lines[0].rate, rust_decimal::Decimal::from(5));
    drop(calls);

    match outcome {
        SubmitOutcome::AwaitingPayment { document } => {
            assert_eq!(document.id, "SINV-0001");
            assert_eq!(document.kind, DocumentKind::SalesInvoice);
        }
        other => panic!("expected AwaitingPayment, got {:?}", other),
    }

    match controller.phase() {
        SettlementPhase::PaymentPending { document } => {
            assert_eq!(document.id, "SINV-0001");
            assert_eq!(document.kind, DocumentKind::SalesInvoice);
        }
        other => panic!("expected PaymentPending, got {:?}", other),
    }

    // Payment still owed: the cart survives.
    assert_eq!(session.cleared(), 0);
}

#[tokio::test]
async fn quotation_submission_files_exports_and_clears() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_create(Ok(DocumentOutcome::Completed {
        document: DocumentRef::created(DocumentKind::Quotation, "SAL-ORD-Q-0001"),
    }));
    let session = Arc::new(FakeSession::quotation(tea_cart(), Some("CUST-001")));
    let snapshots = Arc::new(CollectingSnapshotWriter::default());
    let controller = CheckoutController::new(gateway.clone(), session.clone())
        .with_snapshot_writer(snapshots.clone());

    let outcome = controller.submit().await;

    assert!(matches!(
        outcome,
        SubmitOutcome::QuotationFiled { ref document } if document.id == "SAL-ORD-Q-0001"
    ));

    // Quotations never enter payment pending; the flow ends at Idle.
    assert_eq!(controller.phase(), SettlementPhase::Idle);

    // Downloadable artifact: <documentId>.txt with pretty-printed JSON.
    let saved = snapshots.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "SAL-ORD-Q-0001.txt");
    assert!(saved[0].1.contains("\"name\": \"SAL-ORD-Q-0001\""));
    drop(saved);

    assert_eq!(session.cleared(), 1);
    assert_eq!(session.order_refreshes.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn quotation_submission_refreshes_table_orders_when_table_active() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_create(Ok(DocumentOutcome::Completed {
        document: DocumentRef::created(DocumentKind::Quotation, "SAL-ORD-Q-0002"),
    }));
    let session = Arc::new(
        FakeSession::quotation(tea_cart(), Some("CUST-001")).with_table("TABLE-7"),
    );
    let controller = controller(gateway, session.clone());

    controller.submit().await;

    assert_eq!(
        *session.table_refreshes.lock().unwrap(),
        vec!["TABLE-7".to_string()]
    );
}

#[tokio::test]
async fn active_quotation_converts_instead_of_creating() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_convert(Ok(DocumentOutcome::Completed {
        document: DocumentRef::converted("SINV-0002"),
    }));
    let session = Arc::new(
        FakeSession::quotation(tea_cart(), Some("CUST-001"))
            .with_active_quotation("SAL-ORD-Q-0001"),
    );
    let controller = controller(gateway.clone(), session.clone());

    let outcome = controller.submit().await;

    assert_eq!(gateway.create_call_count(), 0);
    assert_eq!(gateway.convert_call_count(), 1);
    assert_eq!(
        gateway.convert_calls.lock().unwrap()[0].quotation_id,
        "SAL-ORD-Q-0001"
    );

    // The result is a sales-invoice reference, never a quotation one.
    match outcome {
        SubmitOutcome::AwaitingPayment { document } => {
            assert_eq!(document.id, "SINV-0002");
            assert_eq!(document.kind, DocumentKind::SalesInvoice);
            assert!(document.converted_from_quotation);
        }
        other => panic!("expected AwaitingPayment, got {:?}", other),
    }
    assert!(controller.phase().is_payment_pending());

    // Payment still owed after conversion: cart is NOT cleared yet.
    assert_eq!(session.cleared(), 0);
}

#[tokio::test]
async fn conversion_failure_folds_detail_and_leaves_idle() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_convert(Err(GatewayError::Rejected(FailureDetail {
        message: Some("Quotation already converted".to_string()),
        details: Some("Linked invoice SINV-0002 exists".to_string()),
        error_type: None,
    })));
    let session = Arc::new(
        FakeSession::quotation(tea_cart(), Some("CUST-001"))
            .with_active_quotation("SAL-ORD-Q-0001"),
    );
    let controller = controller(gateway, session.clone());

    let outcome = controller.submit().await;

    match &outcome {
        SubmitOutcome::Failed(notice) => {
            assert_eq!(
                notice.message,
                "Quotation already converted: Linked invoice SINV-0002 exists"
            );
            // Conversion failures stay on screen longer.
            assert_eq!(notice.duration, NoticeDuration::Extended);
        }
        other => panic!("expected Failed, got {:?}", other),
    }

    // Not payment pending: the phase is submit-capable again with the
    // error recorded.
    let phase = controller.phase();
    assert!(!phase.is_payment_pending());
    assert!(phase.accepts_submit());
    assert_eq!(
        phase.last_error().unwrap().message,
        "Quotation already converted: Linked invoice SINV-0002 exists"
    );

    // Never clear the cart on failure.
    assert_eq!(session.cleared(), 0);
}

#[tokio::test]
async fn empty_cart_submit_is_a_noop() {
    let gateway = Arc::new(ScriptedGateway::new());
    let session = Arc::new(FakeSession::invoice(Vec::new(), Some("CUST-001")));
    let controller = controller(gateway.clone(), session);

    let outcome = controller.submit().await;

    assert_eq!(outcome, SubmitOutcome::Ignored);
    assert_eq!(controller.phase(), SettlementPhase::Idle);
    assert_eq!(gateway.create_call_count(), 0);
    assert_eq!(gateway.convert_call_count(), 0);
}

#[tokio::test]
async fn quotation_without_customer_is_rejected_locally() {
    let gateway = Arc::new(ScriptedGateway::new());
    let session = Arc::new(FakeSession::quotation(tea_cart(), None));
    let controller = controller(gateway.clone(), session);

    let outcome = controller.submit().await;

    match outcome {
        SubmitOutcome::Rejected(notice) => {
            assert_eq!(notice.message, "customer is required");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
    assert_eq!(gateway.create_call_count(), 0);
}

#[tokio::test]
async fn invoice_flow_falls_back_to_default_customer() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_default_customer(Ok(Some("WALK-IN".to_string())));
    gateway.script_create(Ok(DocumentOutcome::Completed {
        document: DocumentRef::created(DocumentKind::SalesInvoice, "SINV-0003"),
    }));
    let session = Arc::new(FakeSession::invoice(tea_cart(), None));
    let controller = controller(gateway.clone(), session);

    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::AwaitingPayment { .. }));
    let calls = gateway.create_calls.lock().unwrap();
    assert_eq!(calls[0].context.customer, "WALK-IN");
    // Display name falls back to the identifier.
    assert_eq!(calls[0].context.customer_name, "WALK-IN");
}

#[tokio::test]
async fn invoice_flow_without_any_customer_fails_validation() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_default_customer(Ok(None));
    let session = Arc::new(FakeSession::invoice(tea_cart(), None));
    let controller = controller(gateway.clone(), session);

    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    // Validation failures never reach the document operation.
    assert_eq!(gateway.create_call_count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn second_submit_while_in_flight_is_ignored() {
    init_tracing();

    let gateway = Arc::new(ScriptedGateway::new());
    let gate = gateway.gate_create();
    gateway.script_create(Ok(DocumentOutcome::Completed {
        document: DocumentRef::created(DocumentKind::SalesInvoice, "SINV-0004"),
    }));
    let session = Arc::new(FakeSession::invoice(tea_cart(), Some("CUST-001")));
    let controller = Arc::new(CheckoutController::new(gateway.clone(), session));

    let in_flight = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit().await })
    };

    // Let the first submission reach the gated backend call.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(gateway.create_call_count(), 1);

    // A second trigger while the first is in flight must not dispatch
    // another create.
    let second = controller.submit().await;
    assert_eq!(second, SubmitOutcome::Ignored);
    assert_eq!(gateway.create_call_count(), 1);

    gate.add_permits(1);
    let first = in_flight.await.unwrap();
    assert!(matches!(first, SubmitOutcome::AwaitingPayment { .. }));
    assert_eq!(gateway.create_call_count(), 1);
}

#[tokio::test]
async fn submit_is_ignored_while_payment_pending_until_abandoned() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_create(Ok(DocumentOutcome::Completed {
        document: DocumentRef::created(DocumentKind::SalesInvoice, "SINV-0005"),
    }));
    let session = Arc::new(FakeSession::invoice(tea_cart(), Some("CUST-001")));
    let controller = controller(gateway.clone(), session);

    controller.submit().await;
    assert!(controller.phase().is_payment_pending());

    // Resubmitting would create a second document for the same cart.
    assert_eq!(controller.submit().await, SubmitOutcome::Ignored);
    assert_eq!(gateway.create_call_count(), 1);

    // Abandoning hands the pending reference back and reopens submission.
    let abandoned = controller.abandon().unwrap();
    assert_eq!(abandoned.id, "SINV-0005");
    assert_eq!(controller.phase(), SettlementPhase::Idle);

    gateway.script_create(Ok(DocumentOutcome::Completed {
        document: DocumentRef::created(DocumentKind::SalesInvoice, "SINV-0006"),
    }));
    assert!(matches!(
        controller.submit().await,
        SubmitOutcome::AwaitingPayment { .. }
    ));
}

#[tokio::test]
async fn rejected_creation_records_failed_phase() {
    let gateway = Arc::new(ScriptedGateway::new());
    gateway.script_create(Ok(DocumentOutcome::Rejected {
        message: "Item TEA is disabled".to_string(),
    }));
    let session = Arc::new(FakeSession::invoice(tea_cart(), Some("CUST-001")));
    let controller = controller(gateway, session.clone());

    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert_eq!(
        controller.phase().last_error().unwrap().message,
        "Item TEA is disabled"
    );
    assert_eq!(session.cleared(), 0);

    // The next attempt clears the recorded failure.
    assert!(controller.phase().accepts_submit());
}
