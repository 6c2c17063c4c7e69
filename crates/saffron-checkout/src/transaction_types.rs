//! # Transaction-Type Loading
//!
//! The allow-list of transaction types is fetched per user. Loading is
//! advisory: a failed or empty fetch keeps whatever list was previously
//! known (seeded with the two well-known types) and logs the problem.
//! Applying the profile's default to the current selection is pure logic
//! and lives in `saffron_core::transaction`.

use tracing::warn;

use saffron_core::TransactionTypeProfile;
use saffron_gateway::SettlementGateway;

/// Fetches the user's transaction-type profile, falling back to
/// `previous` when the backend cannot answer usefully.
pub async fn load_transaction_types(
    gateway: &dyn SettlementGateway,
    previous: &TransactionTypeProfile,
) -> TransactionTypeProfile {
    match gateway.transaction_types().await {
        Ok(profile) if !profile.types.is_empty() => profile,
        Ok(_) => {
            warn!("backend returned an empty transaction-type list; keeping previous");
            previous.clone()
        }
        Err(err) => {
            warn!(%err, "failed to load transaction types; keeping previous");
            previous.clone()
        }
    }
}
