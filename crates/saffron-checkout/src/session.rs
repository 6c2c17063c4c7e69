//! # Order Session Context
//!
//! The controller never reaches into ambient global state. Everything it
//! needs from the order screen (cart contents, customer selection, active
//! table/waiter/quotation) and every mutation it performs on the screen's
//! behalf (clearing the cart, refreshing dependent lists) goes through this
//! trait, so the whole flow is unit-testable against a fake session.

use async_trait::async_trait;

use saffron_core::{CartLine, OrderKind, TransactionType};

/// Read accessors over, and mutator capabilities into, the caller's order
/// state.
///
/// ## Ownership
/// The cart is owned by the session; the controller only ever reads a
/// snapshot of it and asks for it to be cleared. Accessors return owned
/// values because the underlying store is typically behind its own lock.
#[async_trait]
pub trait OrderSession: Send + Sync {
    /// Snapshot of the current cart lines, in display order.
    fn cart(&self) -> Vec<CartLine>;

    /// The transaction type currently selected on the order screen.
    fn transaction_type(&self) -> TransactionType;

    /// Explicitly selected customer, if any.
    fn customer(&self) -> Option<String>;

    /// Display name for the selected customer, if one was captured.
    fn customer_name(&self) -> Option<String>;

    /// How the order is served; `None` means the screen never asked.
    fn order_kind(&self) -> Option<OrderKind>;

    /// Table this order is attached to, if any.
    fn active_table(&self) -> Option<String>;

    /// Waiter/agent assigned to this order, if any.
    fn active_waiter(&self) -> Option<String>;

    /// Identifier of a previously filed quotation for this cart, if one
    /// exists. Its presence selects the convert path.
    fn active_quotation(&self) -> Option<String>;

    /// Empties the cart. Called only after a successful quotation filing
    /// or a successful settlement, never on failure.
    fn clear_cart(&self);

    /// Refreshes the order list after a completed flow.
    async fn refresh_orders(&self);

    /// Refreshes the per-table order list after a completed flow.
    async fn refresh_table_orders(&self, table_id: &str);
}
