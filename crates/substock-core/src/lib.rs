//! SubStock Core Library
//!
//! Hospital pharmacy sub-stock inventory derivation and requisition
//! forecasting.
//!
//! # Architecture
//!
//! ```text
//! Ledger feed ──┐
//!               ├──► Aggregator ──► Classifier ──► Inventory state
//! Config feed ──┘                                       │
//!                                    ┌──────────────────┼──────────────┐
//!                                    ▼                  ▼              ▼
//!                               Dashboard         Requisition       Tables
//!                                 stats            forecaster
//!                                                       │
//!                                              Requisition session
//!                                            (manual edits, selection)
//!                                                       │
//!                                            Finalized requisition
//!                                                       │
//!                                               Print/Export
//! ```
//!
//! # Core Principle
//!
//! **All derived state is recomputed from scratch on every upstream change.**
//! The external store is the only owner of durable data; no derived cache
//! survives between recomputations.
//!
//! # Modules
//!
//! - [`models`]: Domain types (LedgerRecord, InventoryItem, RequisitionItem, etc.)
//! - [`inventory`]: Aggregation and classification pipeline
//! - [`requisition`]: Forecaster and interactive session editor
//! - [`store`]: External realtime-store boundary and in-memory implementation
//! - [`ingest`]: CSV movement-sheet ingestion
//! - [`export`]: Printable requisition documents
//! - [`stats`]: Dashboard summary figures

pub mod export;
pub mod ingest;
pub mod inventory;
pub mod models;
pub mod requisition;
pub mod stats;
pub mod store;

// Re-export commonly used types
pub use export::RequisitionDocument;
pub use ingest::IngestReport;
pub use inventory::compute_inventory;
pub use models::{
    BufferFactor, ConfigSnapshot, ExpiryStatus, FinalizedRequisition, InventoryItem,
    LedgerRecord, MovementKind, Requester, RequisitionItem, StockStatus,
};
pub use requisition::{forecast, RequisitionError, RequisitionSession};
pub use stats::DashboardStats;
pub use store::{MemoryStore, StockStore, StoreError, StoreEvent};

use chrono::{DateTime, Utc};
use rand::Rng;

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error)]
pub enum SubStockError {
    #[error("store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("requisition error: {0}")]
    Requisition(#[from] requisition::RequisitionError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not permitted: {0}")]
    NotPermitted(String),
}

// =========================================================================
// Main API Object
// =========================================================================

/// Session facade wiring a store to the derivation pipeline.
///
/// Read paths recompute from full store snapshots on every call. Mutations
/// are pass-throughs to the store and require the privileged-user fact,
/// which is supplied externally and never affects derivation itself.
pub struct SubStock<S: StockStore> {
    store: S,
    privileged: bool,
}

impl<S: StockStore> SubStock<S> {
    /// Wrap a store for one user session.
    pub fn new(store: S, privileged: bool) -> Self {
        Self { store, privileged }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether this session may perform pass-through mutations.
    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    // =========================================================================
    // Derived State
    // =========================================================================

    /// Derive the current inventory state, evaluated at the current clock.
    pub fn inventory(&self) -> Result<Vec<InventoryItem>, SubStockError> {
        self.inventory_at(Utc::now())
    }

    /// Derive the inventory state at an explicit evaluation clock.
    pub fn inventory_at(&self, now: DateTime<Utc>) -> Result<Vec<InventoryItem>, SubStockError> {
        let records = self.store.ledger()?;
        let config = self.store.config()?;
        Ok(compute_inventory(&records, &config, now))
    }

    /// Dashboard summary figures over the current inventory state.
    pub fn dashboard_stats(&self) -> Result<DashboardStats, SubStockError> {
        Ok(DashboardStats::from_inventory(&self.inventory()?))
    }

    /// The most recent movements, newest first.
    pub fn recent_movements(&self, limit: usize) -> Result<Vec<LedgerRecord>, SubStockError> {
        let mut records = self.store.ledger()?;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(limit);
        Ok(records)
    }

    /// Authorized requesters from the current configuration.
    pub fn requesters(&self) -> Result<Vec<Requester>, SubStockError> {
        Ok(self.store.config()?.requesters)
    }

    // =========================================================================
    // Requisition Workflow
    // =========================================================================

    /// Open a requisition session over the current inventory state.
    pub fn begin_requisition(&self) -> Result<RequisitionSession, SubStockError> {
        self.begin_requisition_at(Utc::now(), &mut rand::thread_rng())
    }

    /// Open a requisition session at an explicit clock and RNG.
    pub fn begin_requisition_at(
        &self,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Result<RequisitionSession, SubStockError> {
        let lines = forecast(&self.inventory_at(now)?);
        Ok(RequisitionSession::new(lines, now.date_naive(), rng))
    }

    // =========================================================================
    // Privileged Pass-Throughs
    // =========================================================================

    /// Import a movement sheet and push every parsed record to the store.
    pub fn import_movements(
        &self,
        csv_text: &str,
        kind: MovementKind,
    ) -> Result<IngestReport, SubStockError> {
        self.require_privilege("import movements")?;
        let report = ingest::parse_movement_csv(csv_text, kind, Utc::now());
        for record in report.records.clone() {
            self.store.push_record(record)?;
        }
        tracing::info!(
            imported = report.records.len(),
            skipped = report.skipped,
            "movement sheet imported"
        );
        Ok(report)
    }

    /// Remove a ledger record by ID.
    pub fn remove_record(&self, id: &str) -> Result<(), SubStockError> {
        self.require_privilege("remove record")?;
        self.store.remove_record(id)?;
        tracing::info!(record = id, "ledger record removed");
        Ok(())
    }

    /// Persist the threshold and cabinet for a drug code.
    pub fn set_drug_config(
        &self,
        code: &str,
        min_stock: u32,
        cabinet: &str,
    ) -> Result<(), SubStockError> {
        self.require_privilege("save drug config")?;
        self.store.set_drug_config(code, min_stock, cabinet)?;
        tracing::info!(code, min_stock, cabinet, "drug config saved");
        Ok(())
    }

    /// Add a requester; returns the store-assigned ID.
    pub fn add_requester(&self, name: &str) -> Result<String, SubStockError> {
        self.require_privilege("add requester")?;
        Ok(self.store.add_requester(name)?)
    }

    /// Remove a requester by ID.
    pub fn remove_requester(&self, id: &str) -> Result<(), SubStockError> {
        self.require_privilege("remove requester")?;
        Ok(self.store.remove_requester(id)?)
    }

    fn require_privilege(&self, action: &str) -> Result<(), SubStockError> {
        if self.privileged {
            Ok(())
        } else {
            Err(SubStockError::NotPermitted(action.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_store() -> MemoryStore {
        let mut config = ConfigSnapshot::default();
        config.min_stock.insert("ABC123".into(), 50);
        config.cabinets.insert("ABC123".into(), "A".into());

        let mut rec_in = LedgerRecord::new("ABC123", "Paracetamol 500mg", "L1", 100, date(2024, 1, 1));
        rec_in.price = 1.25;
        let rec_out = LedgerRecord::new("ABC123", "Paracetamol 500mg", "L1", -30, date(2024, 1, 10));

        MemoryStore::with_data(vec![rec_in, rec_out], config)
    }

    #[test]
    fn test_inventory_from_store_snapshots() {
        let substock = SubStock::new(seeded_store(), false);
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

        let inventory = substock.inventory_at(now).unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].balance, 70);
        assert_eq!(inventory[0].status, StockStatus::Normal);
        assert_eq!(inventory[0].cabinet, "A");
    }

    #[test]
    fn test_recompute_reflects_store_changes() {
        let substock = SubStock::new(seeded_store(), true);
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

        let rec = LedgerRecord::new("ABC123", "Paracetamol 500mg", "L1", -25, date(2024, 1, 14));
        substock.store().push_record(rec).unwrap();

        let inventory = substock.inventory_at(now).unwrap();
        assert_eq!(inventory[0].balance, 45);
        assert_eq!(inventory[0].status, StockStatus::Low);
    }

    #[test]
    fn test_unprivileged_mutations_refused() {
        let substock = SubStock::new(seeded_store(), false);

        assert!(matches!(
            substock.set_drug_config("ABC123", 10, "B"),
            Err(SubStockError::NotPermitted(_))
        ));
        assert!(matches!(
            substock.remove_record("whatever"),
            Err(SubStockError::NotPermitted(_))
        ));
        assert!(matches!(
            substock.add_requester("Somchai"),
            Err(SubStockError::NotPermitted(_))
        ));
    }

    #[test]
    fn test_privileged_flag_does_not_change_derivation() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let viewer = SubStock::new(seeded_store(), false);
        let admin = SubStock::new(seeded_store(), true);

        assert_eq!(
            viewer.inventory_at(now).unwrap(),
            admin.inventory_at(now).unwrap()
        );
    }

    #[test]
    fn test_begin_requisition_covers_full_inventory() {
        let substock = SubStock::new(seeded_store(), false);
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

        let session = substock
            .begin_requisition_at(now, &mut rand::thread_rng())
            .unwrap();
        assert_eq!(session.items().len(), 1);
        assert!(session.doc_id().starts_with("REQ-20240115-"));
    }

    #[test]
    fn test_import_movements_pushes_records() {
        let substock = SubStock::new(MemoryStore::new(), true);
        let sheet = "\
dispno,date,department,code,name,amount,pack,price,lot,barcode,expdate
D001,2024-01-10,IPD,ABC123,Paracetamol 500mg,100,100 TAB,1.25,L1,885000111,2025-06-30
";
        let report = substock.import_movements(sheet, MovementKind::In).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(substock.store().ledger().unwrap().len(), 1);
    }

    #[test]
    fn test_dashboard_stats_over_current_state() {
        let substock = SubStock::new(seeded_store(), false);
        let stats = substock.dashboard_stats().unwrap();

        assert_eq!(stats.total_items, 1);
        assert_eq!(stats.total_value, 70.0 * 1.25);
        assert_eq!(stats.value_by_cabinet[0].cabinet, "A");
    }

    #[test]
    fn test_recent_movements_newest_first() {
        let substock = SubStock::new(seeded_store(), false);

        let movements = substock.recent_movements(1).unwrap();
        assert_eq!(movements.len(), 1);

        let all = substock.recent_movements(10).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].timestamp >= all[1].timestamp);
    }

    #[test]
    fn test_requesters_exposed_from_config() {
        let substock = SubStock::new(MemoryStore::new(), true);
        substock.add_requester("Somchai").unwrap();

        let requesters = substock.requesters().unwrap();
        assert_eq!(requesters.len(), 1);
        assert_eq!(requesters[0].name, "Somchai");
    }
}
