//! Configuration snapshot models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Cabinet label used when a drug code has no assignment.
pub const UNASSIGNED_CABINET: &str = "Unassigned";

/// An authorized requester identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Requester {
    /// Store-assigned ID
    pub id: String,
    /// Display name
    pub name: String,
}

/// Current settings, re-delivered in full on every change.
///
/// Owned and mutated by the external settings collaborator; the core only
/// reads the latest snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConfigSnapshot {
    /// Minimum-stock threshold per drug code
    pub min_stock: HashMap<String, u32>,
    /// Cabinet label per drug code
    pub cabinets: HashMap<String, String>,
    /// Authorized requesters, in store order
    pub requesters: Vec<Requester>,
}

impl ConfigSnapshot {
    /// Threshold for a drug code, defaulting to 0 when absent.
    pub fn min_stock_for(&self, code: &str) -> u32 {
        self.min_stock.get(code).copied().unwrap_or(0)
    }

    /// Cabinet label for a drug code, defaulting to "Unassigned" when absent.
    pub fn cabinet_for(&self, code: &str) -> String {
        self.cabinets
            .get(code)
            .cloned()
            .unwrap_or_else(|| UNASSIGNED_CABINET.to_string())
    }

    /// Look up a requester by display name.
    pub fn requester_named(&self, name: &str) -> Option<&Requester> {
        self.requesters.iter().find(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_code_defaults() {
        let config = ConfigSnapshot::default();
        assert_eq!(config.min_stock_for("ABC123"), 0);
        assert_eq!(config.cabinet_for("ABC123"), "Unassigned");
    }

    #[test]
    fn test_configured_code() {
        let mut config = ConfigSnapshot::default();
        config.min_stock.insert("ABC123".into(), 50);
        config.cabinets.insert("ABC123".into(), "B".into());

        assert_eq!(config.min_stock_for("ABC123"), 50);
        assert_eq!(config.cabinet_for("ABC123"), "B");
    }

    #[test]
    fn test_requester_lookup() {
        let mut config = ConfigSnapshot::default();
        config.requesters.push(Requester {
            id: "r1".into(),
            name: "Somchai".into(),
        });

        assert!(config.requester_named("Somchai").is_some());
        assert!(config.requester_named("Somsak").is_none());
    }
}
