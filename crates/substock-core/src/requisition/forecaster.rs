//! Reorder forecasting over the current inventory state.

use crate::models::{BufferFactor, InventoryItem, RequisitionItem};

/// Divisor turning total historical dispensing into a weekly rate.
///
/// The whole ledger history is divided by this constant rather than filtered
/// to a trailing window.
pub const USAGE_WINDOW_WEEKS: f64 = 4.0;

/// Build one requisition line per inventory entry, in input order.
///
/// Pure: the inventory state is read, never mutated.
pub fn forecast(inventory: &[InventoryItem]) -> Vec<RequisitionItem> {
    inventory.iter().map(forecast_item).collect()
}

/// Forecast a single inventory entry.
///
/// Suggestions top the balance back up to a buffered weekly usage and are
/// clamped at zero; an entry above its threshold gets no suggestion at all.
/// The line starts selected exactly when the entry sits at or below its
/// threshold, with the manual order still zero.
pub fn forecast_item(item: &InventoryItem) -> RequisitionItem {
    let weekly_rate = item.total_out.unsigned_abs() as f64 / USAGE_WINDOW_WEEKS;
    let needs_order = item.balance <= i64::from(item.min_stock);

    let suggest = |factor: BufferFactor| -> u32 {
        if !needs_order {
            return 0;
        }
        let base = (weekly_rate * factor.multiplier()).ceil() as i64;
        (base - item.balance).max(0) as u32
    };

    RequisitionItem {
        usage_rate_per_week: (weekly_rate * 100.0).round() / 100.0,
        suggested_1_2: suggest(BufferFactor::X1_2),
        suggested_1_5: suggest(BufferFactor::X1_5),
        manual_order: 0,
        is_selected: needs_order,
        item: item.clone(),
    }
}
