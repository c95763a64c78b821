//! Interactive requisition session.

use chrono::NaiveDate;
use rand::Rng;

use crate::models::{BufferFactor, FinalizedRequisition, RequisitionItem};

use super::{RequisitionError, RequisitionResult};

/// Mutable working copy of a forecast, owned by one interactive session.
///
/// Only `manual_order` and `is_selected` change after creation, through the
/// operations below. Dropping the session discards all edits; finalizing
/// hands an immutable snapshot to the print/export collaborator.
#[derive(Debug, Clone)]
pub struct RequisitionSession {
    doc_id: String,
    issued_on: NaiveDate,
    requester: Option<String>,
    items: Vec<RequisitionItem>,
}

impl RequisitionSession {
    /// Open a session over a forecast snapshot.
    ///
    /// The document identifier is generated up front so it can be shown while
    /// the user is still editing.
    pub fn new(items: Vec<RequisitionItem>, today: NaiveDate, rng: &mut impl Rng) -> Self {
        Self {
            doc_id: generate_doc_id(today, rng),
            issued_on: today,
            requester: None,
            items,
        }
    }

    /// Document identifier for this session.
    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// Issue date of this session.
    pub fn issued_on(&self) -> NaiveDate {
        self.issued_on
    }

    /// All lines, in forecast order.
    pub fn items(&self) -> &[RequisitionItem] {
        &self.items
    }

    /// Choose the requester for this session.
    pub fn set_requester(&mut self, name: impl Into<String>) {
        self.requester = Some(name.into());
    }

    /// The chosen requester, if any.
    pub fn requester(&self) -> Option<&str> {
        self.requester.as_deref()
    }

    /// Set the manual order quantity on the matching line.
    ///
    /// Negative input is clamped to zero. The line becomes selected exactly
    /// when the resulting quantity is positive. An unknown (code, lot) pair
    /// is a no-op.
    pub fn set_manual_order(&mut self, code: &str, lot_no: &str, quantity: i64) {
        let quantity = quantity.max(0) as u32;
        if let Some(line) = self.items.iter_mut().find(|l| l.matches(code, lot_no)) {
            line.manual_order = quantity;
            line.is_selected = quantity > 0;
        }
    }

    /// Overwrite every line's manual order with its precomputed suggestion.
    ///
    /// Prior manual edits are discarded across the board; a line whose
    /// suggestion is zero is deselected even if it was selected by hand.
    pub fn apply_suggestion(&mut self, factor: BufferFactor) {
        for line in &mut self.items {
            let suggested = line.suggested(factor);
            line.manual_order = suggested;
            line.is_selected = suggested > 0;
        }
    }

    /// Flip the selection flag of the matching line, leaving its manual
    /// order untouched. An unknown (code, lot) pair is a no-op.
    pub fn toggle_selected(&mut self, code: &str, lot_no: &str) {
        if let Some(line) = self.items.iter_mut().find(|l| l.matches(code, lot_no)) {
            line.is_selected = !line.is_selected;
        }
    }

    /// Select or deselect every line uniformly.
    pub fn select_all(&mut self, selected: bool) {
        for line in &mut self.items {
            line.is_selected = selected;
        }
    }

    /// The currently selected lines.
    pub fn selected_items(&self) -> Vec<&RequisitionItem> {
        self.items.iter().filter(|l| l.is_selected).collect()
    }

    /// Number of selected lines.
    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|l| l.is_selected).count()
    }

    /// Running order value: manual order × unit price over selected lines.
    pub fn selected_total(&self) -> f64 {
        self.items
            .iter()
            .filter(|l| l.is_selected)
            .map(RequisitionItem::line_total)
            .sum()
    }

    /// Finalize into an immutable document for the print collaborator.
    ///
    /// Refused when no line is selected or no requester was chosen; the
    /// session is left untouched on refusal so the user can keep editing.
    pub fn finalize(&self) -> RequisitionResult<FinalizedRequisition> {
        let requester = self
            .requester
            .clone()
            .ok_or(RequisitionError::MissingRequester)?;

        let items: Vec<RequisitionItem> = self
            .items
            .iter()
            .filter(|l| l.is_selected)
            .cloned()
            .collect();
        if items.is_empty() {
            return Err(RequisitionError::NothingSelected);
        }

        tracing::info!(doc_id = %self.doc_id, lines = items.len(), "requisition finalized");

        Ok(FinalizedRequisition {
            doc_id: self.doc_id.clone(),
            requester,
            issued_on: self.issued_on,
            items,
        })
    }
}

/// Generate a requisition document identifier: `REQ-<YYYYMMDD>-<NNN>`.
///
/// Human traceability only; the 3-digit suffix is random and collisions are
/// accepted.
pub fn generate_doc_id(today: NaiveDate, rng: &mut impl Rng) -> String {
    format!("REQ-{}-{:03}", today.format("%Y%m%d"), rng.gen_range(0..1000))
}
