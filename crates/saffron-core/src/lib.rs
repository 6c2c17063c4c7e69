//! # saffron-core: Pure Business Logic for Saffron POS
//!
//! This crate is the **heart** of the order-settlement workflow. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Saffron POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (order screen)                      │   │
//! │  │    Menu UI ──► Cart UI ──► Submit ──► Payment dialog            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  saffron-checkout (orchestration)               │   │
//! │  │    CheckoutController, PaymentProcessor, ExchangeRateCache      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ saffron-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │ document  │  │ currency  │  │transaction│  │   │
//! │  │   │ CartLine  │  │DocumentRef│  │PaymentSet │  │  types    │  │   │
//! │  │   │ transform │  │OrderContext│ │RateTable  │  │  profile  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO BACKEND • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                saffron-gateway (backend contract)               │   │
//! │  │        create/convert documents, payments, exchange rates       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart lines and the cart → document-line transform
//! - [`document`] - Document kinds, references, order context
//! - [`currency`] - Exchange-rate table and payment-set cleaning
//! - [`transaction`] - Transaction types and the dynamic allow-list
//! - [`menu`] - Menu item filtering with configurable fallback
//! - [`error`] - Domain error types
//! - [`validation`] - Pre-submission validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Backend, network, file system access is FORBIDDEN here
//! 3. **Decimal Money**: Rates and tendered amounts are `rust_decimal::Decimal`
//!    (multi-currency tenders do not reduce to integer cents)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

pub mod cart;
pub mod currency;
pub mod document;
pub mod error;
pub mod menu;
pub mod transaction;
pub mod validation;

// Re-exports so users can do `use saffron_core::CartLine` instead of
// `use saffron_core::cart::CartLine`
pub use cart::{transform_cart, CartLine, DocumentLine};
pub use currency::{ExchangeRateTable, PaymentSet};
pub use document::{DocumentKind, DocumentRef, OrderContext, OrderKind};
pub use error::ValidationError;
pub use transaction::{TransactionType, TransactionTypeProfile};

/// Maximum items allowed in a single cart
///
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in a cart
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 999;
