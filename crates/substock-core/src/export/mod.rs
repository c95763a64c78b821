//! Print/export documents for finalized requisitions.

mod document;

pub use document::*;
