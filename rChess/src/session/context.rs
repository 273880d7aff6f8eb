//! Session context around the stored credential.

use std::sync::Arc;

use super::{KeyValueStore, MemoryStore};
use crate::error::Result;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Explicit session context shared by the client and the router.
///
/// An empty stored value counts as logged out.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Session {
    /// Create a session over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Create a session backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Current token, if any.
    pub fn get(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Store a token.
    pub fn set(&self, token: impl AsRef<str>) -> Result<()> {
        self.store.set(TOKEN_KEY, token.as_ref())
    }

    /// Forget the token. Clearing an empty session is a no-op.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)
    }

    /// Check if a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    /// Underlying store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated());

        session.set("abc").unwrap();
        assert_eq!(session.get().as_deref(), Some("abc"));
        assert!(session.is_authenticated());

        session.clear().unwrap();
        assert_eq!(session.get(), None);
        assert!(session.store().get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let session = Session::new(Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "")])));
        assert!(!session.is_authenticated());
        assert_eq!(session.get(), None);
    }

    #[test]
    fn test_clear_twice() {
        let session = Session::in_memory();
        session.set("abc").unwrap();
        session.clear().unwrap();
        session.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_clones_share_store() {
        let session = Session::in_memory();
        let other = session.clone();
        session.set("abc").unwrap();
        assert_eq!(other.get().as_deref(), Some("abc"));
    }
}
