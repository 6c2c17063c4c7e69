//! # Transaction Types
//!
//! Which flow a submission runs is decided by the transaction type the
//! cashier selected. The set of types a user may select is NOT a closed
//! enum: it is fetched per user from the backend, so the type itself is a
//! string newtype and only the two well-known values get named
//! constructors. Anything that is not the quotation type runs the
//! sales-invoice flow.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A transaction type as selected on the order screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct TransactionType(String);

impl TransactionType {
    pub const QUOTATION: &'static str = "Quotation";
    pub const SALES_INVOICE: &'static str = "Sales Invoice";

    pub fn new(name: impl Into<String>) -> Self {
        TransactionType(name.into())
    }

    pub fn quotation() -> Self {
        TransactionType(Self::QUOTATION.to_string())
    }

    pub fn sales_invoice() -> Self {
        TransactionType(Self::SALES_INVOICE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The quotation flow is selected by exactly this type; every other
    /// type runs the sales-invoice flow.
    pub fn is_quotation(&self) -> bool {
        self.0 == Self::QUOTATION
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-user transaction-type allow-list with an optional default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TransactionTypeProfile {
    /// Types this user may run.
    pub types: Vec<TransactionType>,

    /// Preferred type to pre-select, when the backend names one.
    #[serde(default)]
    pub default_type: Option<TransactionType>,
}

impl TransactionTypeProfile {
    /// The seed profile used until the backend list arrives: both
    /// well-known types, no preferred default.
    pub fn well_known() -> Self {
        TransactionTypeProfile {
            types: vec![TransactionType::sales_invoice(), TransactionType::quotation()],
            default_type: None,
        }
    }

    pub fn contains(&self, ty: &TransactionType) -> bool {
        self.types.iter().any(|t| t == ty)
    }

    /// Resolves the effective selection.
    ///
    /// The current selection survives when it is allow-listed; otherwise
    /// the profile default applies. With no default the current selection
    /// is left as-is (the UI keeps whatever it had).
    pub fn resolve(&self, current: Option<&TransactionType>) -> Option<TransactionType> {
        match (&self.default_type, current) {
            (Some(default), None) => Some(default.clone()),
            (Some(default), Some(current)) if !self.contains(current) => Some(default.clone()),
            (_, current) => current.cloned(),
        }
    }
}
