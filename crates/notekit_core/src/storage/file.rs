//! File-backed storage backend.
//!
//! # Responsibility
//! - Map each storage key to one JSON document under a root directory.
//! - Write atomically so a crash never leaves a torn document behind.
//!
//! # Invariants
//! - Key `k` lives at `<root>/k.json`.
//! - A missing document reads as `Ok(None)`.
//! - Two processes writing the same root race last-writer-wins; the port
//!   offers no cross-process coordination.

use super::{StorageError, StoragePort, StorageResult};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage port keeping one `<key>.json` document per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates a port rooted at `root`. The directory itself is created on
    /// the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.document_path(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.document_path(key)?;
        fs::create_dir_all(&self.root)?;

        // Write to a sibling temp file, then rename over the target.
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path)
            .map_err(|err| StorageError::Io(err.error))?;
        Ok(())
    }
}

/// Rejects keys that are empty or would escape the storage root.
fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
