//! JSON-file backed key-value store.

use parking_lot::RwLock;
use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
};

use super::traits::KeyValueStore;
use crate::error::{Error, Result};

/// Store persisted as a flat JSON object.
///
/// The whole map is held in memory and rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`. A missing file starts out empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let data = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    Error::Storage(format!("{} is not a JSON object: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        log::debug!("opened store {} with {} keys", path.display(), data.len());

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn flush(&self, data: &BTreeMap<String, String>) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.write();
        let mut next = data.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.flush(&next)?;
        *data = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut data = self.data.write();
        if !data.contains_key(key) {
            return Ok(());
        }
        let mut next = data.clone();
        next.remove(key);
        self.flush(&next)?;
        *data = next;
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }
}
