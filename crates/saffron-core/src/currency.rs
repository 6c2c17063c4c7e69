//! # Currency Reference Data and Payment Cleaning
//!
//! Two small pure structures:
//!
//! - [`ExchangeRateTable`]: currency code → rate relative to the
//!   organization's base currency. Built whole, replaced whole; readers
//!   never observe a partially written table.
//! - [`PaymentSet`]: currency code → tendered amount, with the cleaning
//!   rule applied before any payment submission: entries must be > 0,
//!   non-positive entries are dropped, not rejected.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Exchange rates relative to a base currency.
///
/// ## Invariants
/// - Always contains the base currency itself, mapped to 1
/// - Every key is a currency code the payment backend recognizes
/// - May be stale (eventually-consistent reference data), never partial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExchangeRateTable {
    base: String,
    #[ts(type = "Record<string, number>")]
    rates: BTreeMap<String, Decimal>,
}

impl ExchangeRateTable {
    /// A table holding only the base currency at rate 1.
    pub fn seeded(base: impl Into<String>) -> Self {
        let base = base.into();
        let mut rates = BTreeMap::new();
        rates.insert(base.clone(), Decimal::ONE);
        ExchangeRateTable { base, rates }
    }

    /// Records the rate for a target currency.
    pub fn insert(&mut self, currency: impl Into<String>, rate: Decimal) {
        self.rates.insert(currency.into(), rate);
    }

    /// The organization's base currency code.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Rate for a currency, if known.
    pub fn rate(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(currency).copied()
    }

    /// Known currency codes, base included.
    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// A multi-currency payment submission: currency code → tendered amount.
///
/// Key order is irrelevant to the backend; a BTreeMap keeps serialization
/// deterministic for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct PaymentSet(#[ts(type = "Record<string, number>")] BTreeMap<String, Decimal>);

impl PaymentSet {
    pub fn new() -> Self {
        PaymentSet(BTreeMap::new())
    }

    /// Records a tendered amount for a currency. Later entries for the
    /// same currency overwrite earlier ones.
    pub fn tender(&mut self, currency: impl Into<String>, amount: Decimal) {
        self.0.insert(currency.into(), amount);
    }

    /// The cleaning rule: keep exactly the entries with amount > 0.
    ///
    /// Non-positive entries are dropped, not rejected; the caller decides
    /// what an empty cleaned set means (defer payment vs. validation
    /// failure).
    pub fn cleaned(&self) -> PaymentSet {
        PaymentSet(
            self.0
                .iter()
                .filter(|(_, amount)| **amount > Decimal::ZERO)
                .map(|(currency, amount)| (currency.clone(), *amount))
                .collect(),
        )
    }

    pub fn amount(&self, currency: &str) -> Option<Decimal> {
        self.0.get(currency).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(currency, amount)| (currency.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Decimal)> for PaymentSet {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        PaymentSet(iter.into_iter().collect())
    }
}
