//! Domain models for the sub-stock system.

mod config;
mod inventory;
mod ledger;
mod requisition;

pub use config::*;
pub use inventory::*;
pub use ledger::*;
pub use requisition::*;
