//! # Exchange Rate Cache
//!
//! Session-scoped cache of the exchange-rate table. Refreshed once per UI
//! session unless explicitly invalidated; the table is eventually-consistent
//! reference data and is never assumed current to the second.
//!
//! ## Failure Policy
//! A failed refresh keeps the previous (possibly absent) table visible and
//! returns the error to the caller. No automatic retry.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use saffron_core::ExchangeRateTable;
use saffron_gateway::{GatewayResult, SettlementGateway};

#[derive(Debug, Default)]
struct CacheState {
    table: Option<ExchangeRateTable>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Holds the current exchange-rate table behind an RwLock so a refresh
/// replaces it atomically: readers see the old table or the new one,
/// never a partially built mix.
#[derive(Debug, Default)]
pub struct ExchangeRateCache {
    state: RwLock<CacheState>,
}

impl ExchangeRateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current table, if a refresh has succeeded this session.
    pub fn current(&self) -> Option<ExchangeRateTable> {
        self.state.read().expect("rate cache lock poisoned").table.clone()
    }

    /// Instant of the last successful refresh.
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().expect("rate cache lock poisoned").refreshed_at
    }

    /// Drops the cached table so the next [`ensure`](Self::ensure) fetches
    /// a fresh one.
    pub fn invalidate(&self) {
        let mut state = self.state.write().expect("rate cache lock poisoned");
        state.table = None;
        state.refreshed_at = None;
    }

    /// Returns the cached table, refreshing only when none is held.
    pub async fn ensure(&self, gateway: &dyn SettlementGateway) -> GatewayResult<ExchangeRateTable> {
        if let Some(table) = self.current() {
            return Ok(table);
        }
        self.refresh(gateway).await
    }

    /// Rebuilds the table from the backend: base currency first, then all
    /// exchange records quoted from that base, with the base itself always
    /// seeded at rate 1.
    pub async fn refresh(&self, gateway: &dyn SettlementGateway) -> GatewayResult<ExchangeRateTable> {
        let base = match gateway.base_currency().await {
            Ok(base) => base,
            Err(err) => {
                warn!(%err, "base currency lookup failed; keeping previous rate table");
                return Err(err);
            }
        };

        let quotes = match gateway.exchange_rates(&base).await {
            Ok(quotes) => quotes,
            Err(err) => {
                warn!(%err, base, "exchange rate fetch failed; keeping previous rate table");
                return Err(err);
            }
        };

        let mut table = ExchangeRateTable::seeded(&base);
        for quote in quotes {
            // The backend filters by source currency; drop anything quoted
            // from a different base that slips through.
            if quote.from_currency == base {
                table.insert(quote.to_currency, quote.exchange_rate);
            }
        }

        debug!(base, currencies = table.len(), "exchange rate table refreshed");

        let mut state = self.state.write().expect("rate cache lock poisoned");
        state.table = Some(table.clone());
        state.refreshed_at = Some(Utc::now());

        Ok(table)
    }
}
