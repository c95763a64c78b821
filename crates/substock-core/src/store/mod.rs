//! External realtime-store boundary.
//!
//! The store owns all durable data. The core reads full snapshots and is
//! notified of changes through a push-based subscription; it never caches
//! derived state across notifications.

mod memory;

pub use memory::*;

use thiserror::Error;

use crate::models::{ConfigSnapshot, LedgerRecord};

/// Change notification emitted by a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The ledger collection changed (record pushed or removed)
    LedgerChanged,
    /// The configuration changed (thresholds, cabinets, requesters)
    ConfigChanged,
}

/// Store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("write rejected: {0}")]
    WriteRejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to a registered change observer.
pub type SubscriptionId = usize;

/// Contract for the external realtime store.
///
/// Reads return full snapshots; there is no delta path. Mutations are
/// pass-through effects with last-write-wins semantics at the store.
pub trait StockStore {
    /// Full ledger snapshot, in store order.
    fn ledger(&self) -> StoreResult<Vec<LedgerRecord>>;

    /// Full configuration snapshot.
    fn config(&self) -> StoreResult<ConfigSnapshot>;

    /// Append a ledger record. The store assigns and returns the record ID.
    fn push_record(&self, record: LedgerRecord) -> StoreResult<String>;

    /// Remove a ledger record by ID.
    fn remove_record(&self, id: &str) -> StoreResult<()>;

    /// Persist the threshold and cabinet for a drug code.
    fn set_drug_config(&self, code: &str, min_stock: u32, cabinet: &str) -> StoreResult<()>;

    /// Add a requester. The store assigns and returns the requester ID.
    fn add_requester(&self, name: &str) -> StoreResult<String>;

    /// Remove a requester by ID.
    fn remove_requester(&self, id: &str) -> StoreResult<()>;

    /// Register a change observer. Observers must not call back into the
    /// store's mutation or subscription methods from inside the callback.
    fn subscribe(&self, observer: Box<dyn Fn(StoreEvent)>) -> SubscriptionId;

    /// Drop a previously registered observer.
    fn unsubscribe(&self, subscription: SubscriptionId);
}
