//! Dashboard summary figures derived from the inventory state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{ExpiryStatus, InventoryItem, StockStatus};

/// Counts per stock status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub normal: usize,
    pub low: usize,
    pub empty: usize,
}

/// Total stock value held in one cabinet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CabinetValue {
    /// Cabinet label
    pub cabinet: String,
    /// Sum of balance × price over the cabinet's lots
    pub value: f64,
}

/// Summary figures for the dashboard, derived from the full inventory state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// Number of (code, lot) entries
    pub total_items: usize,
    /// Total stock value: sum of balance × price
    pub total_value: f64,
    /// Entries at or below their threshold (but not empty)
    pub low_stock_items: usize,
    /// Entries past expiry
    pub expired_items: usize,
    /// Counts per stock status
    pub status_breakdown: StatusBreakdown,
    /// Stock value per cabinet, in first-seen order
    pub value_by_cabinet: Vec<CabinetValue>,
}

impl DashboardStats {
    /// Compute all figures in one pass over the inventory.
    pub fn from_inventory(inventory: &[InventoryItem]) -> Self {
        let mut breakdown = StatusBreakdown::default();
        let mut total_value = 0.0;
        let mut expired_items = 0;

        let mut cabinet_index: HashMap<String, usize> = HashMap::new();
        let mut value_by_cabinet: Vec<CabinetValue> = Vec::new();

        for item in inventory {
            total_value += item.stock_value();
            match item.status {
                StockStatus::Normal => breakdown.normal += 1,
                StockStatus::Low => breakdown.low += 1,
                StockStatus::Empty => breakdown.empty += 1,
            }
            if item.exp_status == ExpiryStatus::Expired {
                expired_items += 1;
            }

            let slot = *cabinet_index
                .entry(item.cabinet.clone())
                .or_insert_with(|| {
                    value_by_cabinet.push(CabinetValue {
                        cabinet: item.cabinet.clone(),
                        value: 0.0,
                    });
                    value_by_cabinet.len() - 1
                });
            value_by_cabinet[slot].value += item.stock_value();
        }

        Self {
            total_items: inventory.len(),
            total_value,
            low_stock_items: breakdown.low,
            expired_items,
            status_breakdown: breakdown,
            value_by_cabinet,
        }
    }
}
