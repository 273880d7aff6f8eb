//! In-memory key-value store.

use parking_lot::RwLock;
use std::collections::HashMap;

use super::traits::KeyValueStore;
use crate::error::Result;

/// In-memory store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let store = MemoryStore::new();

        store.set("key1", "value1").unwrap();
        assert_eq!(store.get("key1"), Some("value1".to_owned()));

        store.remove("key1").unwrap();
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let store = MemoryStore::new();
        assert!(store.remove("token").is_ok());
        assert!(store.remove("token").is_ok());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_with_entries() {
        let store = MemoryStore::with_entries([("token", "abc")]);
        assert_eq!(store.get("token").as_deref(), Some("abc"));
        assert_eq!(store.keys(), vec!["token".to_owned()]);
    }
}
