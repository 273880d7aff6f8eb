//! Key-value storage trait definitions.

use crate::error::Result;

/// Trait for persistent key-value storage backends.
///
/// Every call is atomic on its own. `remove` on a missing key is a no-op.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Get a value by key.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value by key.
    fn remove(&self, key: &str) -> Result<()>;

    /// List stored keys.
    fn keys(&self) -> Vec<String>;
}
