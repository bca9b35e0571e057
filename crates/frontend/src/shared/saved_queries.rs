//! Saved advanced-mode queries, persisted in localStorage.
//!
//! The list is append-only from the UI.

use contracts::shared::analytics::{QuerySpec, SavedQuery};
use web_sys::window;

pub const SAVED_QUERIES_STORAGE_KEY: &str = "sales_analytics.saved_queries";

/// Minimal key/value storage
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let storage = window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or("localStorage is not available")?;
        storage
            .set_item(key, value)
            .map_err(|e| format!("Failed to write localStorage: {:?}", e))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SavedQueryStore<S: KeyValueStorage = BrowserStorage> {
    storage: S,
}

impl SavedQueryStore<BrowserStorage> {
    pub fn new() -> Self {
        Self::with_storage(BrowserStorage)
    }
}

impl<S: KeyValueStorage> SavedQueryStore<S> {
    pub fn with_storage(storage: S) -> Self {
        Self { storage }
    }

    /// Stored list; a missing or corrupt value reads as empty
    pub fn list(&self) -> Vec<SavedQuery> {
        let Some(raw) = self.storage.get_item(SAVED_QUERIES_STORAGE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(e) => {
                log::warn!("Ignoring corrupt saved queries: {}", e);
                Vec::new()
            }
        }
    }

    /// Append a query under `name`. Blank names are rejected.
    pub fn append(&self, name: &str, query: &QuerySpec, timestamp: &str) -> Result<(), String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Nome da query não pode ser vazio".to_string());
        }

        let mut list = self.list();
        list.push(SavedQuery {
            name: name.to_string(),
            query: query.clone(),
            timestamp: timestamp.to_string(),
        });

        let json = serde_json::to_string(&list)
            .map_err(|e| format!("Failed to serialize saved queries: {}", e))?;
        self.storage.set_item(SAVED_QUERIES_STORAGE_KEY, &json)?;
        log::debug!("saved query '{}' ({} total)", name, list.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::analytics::{Aggregation, FieldRef};
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        items: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStorage for &MemoryStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    fn sample_query() -> QuerySpec {
        QuerySpec {
            dimensions: vec![FieldRef::dimension("channel")],
            measures: vec![FieldRef::measure("total_sales", Aggregation::Sum)],
            filters: vec![],
        }
    }

    #[test]
    fn test_append_keeps_order() {
        let memory = MemoryStorage::default();
        let store = SavedQueryStore::with_storage(&memory);
        assert!(store.list().is_empty());

        store
            .append("Canais", &sample_query(), "2024-01-01T10:00:00Z")
            .unwrap();
        store
            .append("  Produtos ", &QuerySpec::default(), "2024-01-02T10:00:00Z")
            .unwrap();

        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Canais");
        assert_eq!(list[0].query, sample_query());
        assert_eq!(list[1].name, "Produtos");
    }

    #[test]
    fn test_blank_name_rejected() {
        let memory = MemoryStorage::default();
        let store = SavedQueryStore::with_storage(&memory);
        assert!(store.append("   ", &sample_query(), "t").is_err());
        assert!(memory.items.borrow().is_empty());
    }

    #[test]
    fn test_corrupt_storage_reads_as_empty() {
        let memory = MemoryStorage::default();
        memory
            .items
            .borrow_mut()
            .insert(SAVED_QUERIES_STORAGE_KEY.to_string(), "{not json".to_string());
        let store = SavedQueryStore::with_storage(&memory);
        assert!(store.list().is_empty());

        store.append("Nova", &sample_query(), "t").unwrap();
        assert_eq!(store.list().len(), 1);
    }
}
