//! In-memory storage backend.
//!
//! Backs tests and embedders that want no files on disk; also the seam for
//! injecting malformed documents when exercising load fallbacks.

use super::{StoragePort, StorageResult};
use std::collections::HashMap;

/// Map-backed storage port with no durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-seeded with one document.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.into(), value.into());
        storage
    }

    /// Returns whether any document is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::StoragePort;

    #[test]
    fn missing_key_reads_as_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get("absent").unwrap().is_none());
    }

    #[test]
    fn set_replaces_the_whole_value() {
        let mut storage = MemoryStorage::with_value("k", "old");
        storage.set("k", "new").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("new"));
    }
}
