//! Inventory derivation pipeline.
//!
//! Pipeline: Ledger records + config snapshot → Aggregation → Classification

mod aggregator;
mod classifier;

pub use aggregator::*;
pub use classifier::*;

use chrono::{DateTime, Utc};

use crate::models::{ConfigSnapshot, InventoryItem, LedgerRecord};

/// Derive the full inventory state from scratch.
///
/// Called on every ledger or config change; nothing is carried over between
/// calls, so repeated computation from the same inputs yields identical
/// output. `now` is the evaluation clock for expiry classification.
pub fn compute_inventory(
    records: &[LedgerRecord],
    config: &ConfigSnapshot,
    now: DateTime<Utc>,
) -> Vec<InventoryItem> {
    let mut entries = aggregate(records, config);

    for entry in &mut entries {
        entry.status = stock_status(entry.balance, entry.min_stock);
        entry.days_to_expire = entry.exp_date.map(|exp| days_to_expire(exp, now));
        entry.exp_status = expiry_status(entry.days_to_expire);
    }

    tracing::debug!(
        records = records.len(),
        entries = entries.len(),
        "inventory state recomputed"
    );

    entries
}
