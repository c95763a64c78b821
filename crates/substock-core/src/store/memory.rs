//! In-memory store for tests and local sessions.

use std::cell::{Cell, RefCell};

use uuid::Uuid;

use crate::models::{ConfigSnapshot, LedgerRecord, Requester};

use super::{StockStore, StoreError, StoreEvent, StoreResult, SubscriptionId};

/// Single-threaded in-memory store with the same observable behavior as the
/// hosted realtime backend: snapshot reads, store-assigned IDs, and change
/// notification after every mutation. Not a durability layer.
#[derive(Default)]
pub struct MemoryStore {
    records: RefCell<Vec<LedgerRecord>>,
    config: RefCell<ConfigSnapshot>,
    observers: RefCell<Vec<(SubscriptionId, Box<dyn Fn(StoreEvent)>)>>,
    next_subscription: Cell<SubscriptionId>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with records and configuration.
    ///
    /// Seeded records without an ID get one assigned, as a push would.
    pub fn with_data(records: Vec<LedgerRecord>, config: ConfigSnapshot) -> Self {
        let store = Self::new();
        {
            let mut stored = store.records.borrow_mut();
            for mut record in records {
                if record.id.is_empty() {
                    record.id = Uuid::new_v4().to_string();
                }
                stored.push(record);
            }
        }
        *store.config.borrow_mut() = config;
        store
    }

    fn notify(&self, event: StoreEvent) {
        for (_, observer) in self.observers.borrow().iter() {
            observer(event);
        }
    }
}

impl StockStore for MemoryStore {
    fn ledger(&self) -> StoreResult<Vec<LedgerRecord>> {
        Ok(self.records.borrow().clone())
    }

    fn config(&self) -> StoreResult<ConfigSnapshot> {
        Ok(self.config.borrow().clone())
    }

    fn push_record(&self, mut record: LedgerRecord) -> StoreResult<String> {
        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
        }
        let id = record.id.clone();
        self.records.borrow_mut().push(record);
        self.notify(StoreEvent::LedgerChanged);
        Ok(id)
    }

    fn remove_record(&self, id: &str) -> StoreResult<()> {
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        drop(records);
        self.notify(StoreEvent::LedgerChanged);
        Ok(())
    }

    fn set_drug_config(&self, code: &str, min_stock: u32, cabinet: &str) -> StoreResult<()> {
        {
            let mut config = self.config.borrow_mut();
            config.min_stock.insert(code.to_string(), min_stock);
            config.cabinets.insert(code.to_string(), cabinet.to_string());
        }
        self.notify(StoreEvent::ConfigChanged);
        Ok(())
    }

    fn add_requester(&self, name: &str) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        self.config.borrow_mut().requesters.push(Requester {
            id: id.clone(),
            name: name.to_string(),
        });
        self.notify(StoreEvent::ConfigChanged);
        Ok(id)
    }

    fn remove_requester(&self, id: &str) -> StoreResult<()> {
        let mut config = self.config.borrow_mut();
        let before = config.requesters.len();
        config.requesters.retain(|r| r.id != id);
        if config.requesters.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        drop(config);
        self.notify(StoreEvent::ConfigChanged);
        Ok(())
    }

    fn subscribe(&self, observer: Box<dyn Fn(StoreEvent)>) -> SubscriptionId {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.observers.borrow_mut().push((id, observer));
        id
    }

    fn unsubscribe(&self, subscription: SubscriptionId) {
        self.observers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_push_assigns_id() {
        let store = MemoryStore::new();
        let rec = LedgerRecord::new("ABC123", "Paracetamol 500mg", "L1", 100, date(2024, 1, 1));
        let id = store.push_record(rec).unwrap();

        assert!(!id.is_empty());
        let ledger = store.ledger().unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].id, id);
    }

    #[test]
    fn test_remove_missing_record() {
        let store = MemoryStore::new();
        assert_eq!(
            store.remove_record("nope"),
            Err(StoreError::NotFound("nope".into()))
        );
    }

    #[test]
    fn test_config_roundtrip() {
        let store = MemoryStore::new();
        store.set_drug_config("ABC123", 50, "B").unwrap();

        let config = store.config().unwrap();
        assert_eq!(config.min_stock_for("ABC123"), 50);
        assert_eq!(config.cabinet_for("ABC123"), "B");
    }

    #[test]
    fn test_requester_lifecycle() {
        let store = MemoryStore::new();
        let id = store.add_requester("Somchai").unwrap();
        assert_eq!(store.config().unwrap().requesters.len(), 1);

        store.remove_requester(&id).unwrap();
        assert!(store.config().unwrap().requesters.is_empty());
    }

    #[test]
    fn test_observers_notified_per_collection() {
        let store = MemoryStore::new();
        let events: Rc<RefCell<Vec<StoreEvent>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&events);
        store.subscribe(Box::new(move |event| sink.borrow_mut().push(event)));

        let rec = LedgerRecord::new("ABC123", "Paracetamol 500mg", "L1", 100, date(2024, 1, 1));
        store.push_record(rec).unwrap();
        store.set_drug_config("ABC123", 50, "A").unwrap();

        assert_eq!(
            *events.borrow(),
            vec![StoreEvent::LedgerChanged, StoreEvent::ConfigChanged]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = MemoryStore::new();
        let events: Rc<RefCell<Vec<StoreEvent>>> = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&events);
        let sub = store.subscribe(Box::new(move |event| sink.borrow_mut().push(event)));
        store.unsubscribe(sub);

        let rec = LedgerRecord::new("ABC123", "Paracetamol 500mg", "L1", 100, date(2024, 1, 1));
        store.push_record(rec).unwrap();
        assert!(events.borrow().is_empty());
    }
}
