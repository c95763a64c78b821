//! Ledger record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction tag carried by a ledger record.
///
/// Informational only: the sign of [`LedgerRecord::quantity`] is authoritative
/// for all balance math.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    /// Goods received into the sub-stock
    In,
    /// Goods dispensed out of the sub-stock
    Out,
}

impl MovementKind {
    /// Derive the tag from a signed quantity.
    pub fn from_quantity(quantity: i64) -> Self {
        if quantity >= 0 {
            MovementKind::In
        } else {
            MovementKind::Out
        }
    }
}

/// One inward or outward movement of a specific drug lot.
///
/// Immutable once created. Records are produced by the ingestion boundary,
/// stored by the external realtime store, and removed only by explicit
/// deletion there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerRecord {
    /// Store-assigned record ID (empty until pushed)
    pub id: String,
    /// Source document / dispense number
    pub document_no: String,
    /// Movement date
    pub date: NaiveDate,
    /// Originating department
    pub department: String,
    /// Drug code
    pub code: String,
    /// Drug display name
    pub name: String,
    /// Signed quantity: positive = received, negative = dispensed
    pub quantity: i64,
    /// Pack description (e.g. "10x10 TAB")
    pub pack: String,
    /// Unit price
    pub price: f64,
    /// Lot number
    pub lot_no: String,
    /// Barcode, if present on the source row
    pub barcode: String,
    /// Expiry date of the lot, if known
    pub exp_date: Option<NaiveDate>,
    /// Ingestion timestamp (milliseconds since epoch)
    pub timestamp: i64,
    /// IN/OUT tag
    pub kind: MovementKind,
}

impl LedgerRecord {
    /// Create a record with the core fields.
    ///
    /// Descriptive fields start empty and the IN/OUT tag follows the sign of
    /// `quantity`. The record ID is assigned by the store on push.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        lot_no: impl Into<String>,
        quantity: i64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: String::new(),
            document_no: String::new(),
            date,
            department: String::new(),
            code: code.into(),
            name: name.into(),
            quantity,
            pack: String::new(),
            price: 0.0,
            lot_no: lot_no.into(),
            barcode: String::new(),
            exp_date: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
            kind: MovementKind::from_quantity(quantity),
        }
    }
}
