//! Derived inventory state models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stock-level classification of a lot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockStatus {
    /// Balance above the minimum-stock threshold
    Normal,
    /// Positive balance at or below the threshold
    Low,
    /// Balance at or below zero
    Empty,
}

/// Expiry classification of a lot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExpiryStatus {
    /// 90 or more days remaining, or no expiry date known
    Ok,
    /// Fewer than 90 days remaining
    Near,
    /// Past expiry
    Expired,
}

/// Derived inventory state for one (drug code, lot number) pair.
///
/// Fully recomputed from the ledger and configuration snapshot on every
/// change; `balance == total_in + total_out` always holds, and the status
/// fields are pure functions of the balance/threshold and expiry/clock
/// inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    /// Drug code
    pub code: String,
    /// Drug display name (first-seen record wins)
    pub name: String,
    /// Pack description (first-seen record wins)
    pub pack: String,
    /// Cumulative quantity received (sum of positive movements)
    pub total_in: i64,
    /// Cumulative quantity dispensed (sum of non-positive movements; ≤ 0)
    pub total_out: i64,
    /// On-hand quantity: total_in + total_out
    pub balance: i64,
    /// Lot number
    pub lot_no: String,
    /// Expiry date, if known
    pub exp_date: Option<NaiveDate>,
    /// Minimum-stock threshold from configuration (0 when unconfigured)
    pub min_stock: u32,
    /// Cabinet label from configuration ("Unassigned" when unconfigured)
    pub cabinet: String,
    /// Unit price (first-seen record wins)
    pub price: f64,
    /// Stock-level classification
    pub status: StockStatus,
    /// Expiry classification
    pub exp_status: ExpiryStatus,
    /// Whole days until expiry, rounded up; `None` when no expiry date known
    pub days_to_expire: Option<i64>,
    /// Most recent movement date among the group's records
    pub last_update: Option<NaiveDate>,
}

impl InventoryItem {
    /// On-hand value of this lot at its recorded unit price.
    pub fn stock_value(&self) -> f64 {
        self.balance as f64 * self.price
    }
}
