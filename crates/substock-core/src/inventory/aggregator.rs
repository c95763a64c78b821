//! Ledger aggregation into per-lot inventory entries.

use std::collections::HashMap;

use crate::models::{ConfigSnapshot, ExpiryStatus, InventoryItem, LedgerRecord, StockStatus};

/// Fold the full ledger into one pre-classification entry per (drug code,
/// lot number) pair, preserving ledger discovery order.
///
/// Balance fields accumulate across the whole group. Descriptive fields
/// (name, pack, price, expiry date) come from the first record seen for a
/// key and are never overwritten by later records. Threshold and cabinet are
/// looked up by drug code, not by lot.
pub fn aggregate(records: &[LedgerRecord], config: &ConfigSnapshot) -> Vec<InventoryItem> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut entries: Vec<InventoryItem> = Vec::new();

    for tx in records {
        let key = (tx.code.clone(), tx.lot_no.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            entries.push(InventoryItem {
                code: tx.code.clone(),
                name: tx.name.clone(),
                pack: tx.pack.clone(),
                total_in: 0,
                total_out: 0,
                balance: 0,
                lot_no: tx.lot_no.clone(),
                exp_date: tx.exp_date,
                min_stock: config.min_stock_for(&tx.code),
                cabinet: config.cabinet_for(&tx.code),
                price: tx.price,
                status: StockStatus::Normal,
                exp_status: ExpiryStatus::Ok,
                days_to_expire: None,
                last_update: None,
            });
            entries.len() - 1
        });

        let entry = &mut entries[slot];
        if tx.quantity > 0 {
            entry.total_in += tx.quantity;
        } else {
            entry.total_out += tx.quantity;
        }
        entry.balance += tx.quantity;
        if entry.last_update.map_or(true, |d| tx.date > d) {
            entry.last_update = Some(tx.date);
        }
    }

    entries
}
