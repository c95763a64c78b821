//! Stock-level and expiry classification.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::{ExpiryStatus, StockStatus};

/// Days before expiry at which a lot is flagged NEAR. Exactly this many days
/// remaining is still OK.
pub const NEAR_EXPIRY_WINDOW_DAYS: i64 = 90;

/// Classify the stock level of a balance against its threshold.
///
/// A balance exactly equal to the threshold is LOW, not NORMAL.
pub fn stock_status(balance: i64, min_stock: u32) -> StockStatus {
    if balance <= 0 {
        StockStatus::Empty
    } else if balance <= i64::from(min_stock) {
        StockStatus::Low
    } else {
        StockStatus::Normal
    }
}

/// Whole days until expiry, rounded up so a partial day still counts as one.
///
/// Expiry is anchored at UTC midnight of the expiry date. The ceiling of a
/// negative fraction rounds toward zero, so a lot that expired earlier today
/// reports 0 rather than -1.
pub fn days_to_expire(exp_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let exp_midnight = exp_date.and_time(NaiveTime::MIN).and_utc();
    let millis = (exp_midnight - now).num_milliseconds() as f64;
    (millis / 86_400_000.0).ceil() as i64
}

/// Classify the expiry horizon. `None` (no expiry date known) is OK.
pub fn expiry_status(days_to_expire: Option<i64>) -> ExpiryStatus {
    match days_to_expire {
        None => ExpiryStatus::Ok,
        Some(days) if days < 0 => ExpiryStatus::Expired,
        Some(days) if days < NEAR_EXPIRY_WINDOW_DAYS => ExpiryStatus::Near,
        Some(_) => ExpiryStatus::Ok,
    }
}
