//! Requisition models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::inventory::InventoryItem;

/// Buffer factor for suggested order quantities.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BufferFactor {
    /// 1.2× weekly usage
    X1_2,
    /// 1.5× weekly usage
    X1_5,
}

impl BufferFactor {
    /// Numeric multiplier applied to the weekly usage rate.
    pub fn multiplier(self) -> f64 {
        match self {
            BufferFactor::X1_2 => 1.2,
            BufferFactor::X1_5 => 1.5,
        }
    }
}

/// One forecast line: an inventory entry plus user-editable order fields.
///
/// `manual_order` and `is_selected` are the only fields mutated after
/// creation, exclusively through the session editor operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequisitionItem {
    /// The underlying inventory state this line was forecast from
    #[serde(flatten)]
    pub item: InventoryItem,
    /// Weekly usage rate, rounded to 2 decimals
    pub usage_rate_per_week: f64,
    /// Suggested order quantity at 1.2× buffer
    pub suggested_1_2: u32,
    /// Suggested order quantity at 1.5× buffer
    pub suggested_1_5: u32,
    /// User-entered order quantity
    pub manual_order: u32,
    /// Whether the line is included in the requisition
    pub is_selected: bool,
}

impl RequisitionItem {
    /// Whether this line is keyed by the given (code, lot) pair.
    pub fn matches(&self, code: &str, lot_no: &str) -> bool {
        self.item.code == code && self.item.lot_no == lot_no
    }

    /// Precomputed suggestion for the given buffer factor.
    pub fn suggested(&self, factor: BufferFactor) -> u32 {
        match factor {
            BufferFactor::X1_2 => self.suggested_1_2,
            BufferFactor::X1_5 => self.suggested_1_5,
        }
    }

    /// Order value of this line at the lot's unit price.
    pub fn line_total(&self) -> f64 {
        self.manual_order as f64 * self.item.price
    }
}

/// Immutable requisition snapshot handed to the print/export collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalizedRequisition {
    /// Document identifier (`REQ-<YYYYMMDD>-<NNN>`); traceability only,
    /// global uniqueness is not guaranteed
    pub doc_id: String,
    /// Requester display name
    pub requester: String,
    /// Issue date
    pub issued_on: NaiveDate,
    /// The selected lines, in session order
    pub items: Vec<RequisitionItem>,
}

impl FinalizedRequisition {
    /// Total order value across all lines.
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(RequisitionItem::line_total).sum()
    }
}
