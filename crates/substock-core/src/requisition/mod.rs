//! Requisition forecasting and the interactive session editor.
//!
//! Pipeline: Inventory state → Forecaster → Session (manual edits, selection)
//!           → Finalized requisition → print/export collaborator

mod editor;
mod forecaster;

pub use editor::*;
pub use forecaster::*;

use thiserror::Error;

/// Requisition session errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequisitionError {
    /// Finalize was attempted with no line selected.
    #[error("no items selected")]
    NothingSelected,

    /// Finalize was attempted before a requester was chosen.
    #[error("no requester chosen")]
    MissingRequester,
}

pub type RequisitionResult<T> = Result<T, RequisitionError>;
