//! InMemoryStore - HashMap-backed key-value store for tests and `--mock` runs.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::ports::KeyValueStore;

/// Clone-friendly via Arc: clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = InMemoryStore::new();
        assert!(store.get("cars").unwrap().is_none());

        store.set("cars", "[]").unwrap();
        assert_eq!(store.get("cars").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        store.remove("cars").unwrap();
        assert!(store.get("cars").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_missing_is_ok() {
        let store = InMemoryStore::new();
        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn clone_shares_storage() {
        let store = InMemoryStore::new();
        let clone = store.clone();

        store.set("favorites", r#"["1"]"#).unwrap();
        assert_eq!(clone.get("favorites").unwrap().as_deref(), Some(r#"["1"]"#));
    }

    #[test]
    fn last_writer_wins() {
        let store = InMemoryStore::new();
        store.set("cars", "first").unwrap();
        store.set("cars", "second").unwrap();
        assert_eq!(store.get("cars").unwrap().as_deref(), Some("second"));
    }
}
