//! Durable key-value storage port and its backends.
//!
//! # Responsibility
//! - Define the get/set contract both stores persist through.
//! - Keep backend details (files, memory) behind the port seam.
//!
//! # Invariants
//! - Values are whole JSON documents; there is no partial write.
//! - A missing key reads as `Ok(None)`, never as an error.
//!
//! # See also
//! - `crate::store` for the collection stores built on this port.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Error for durable-store read and write operations.
#[derive(Debug)]
pub enum StorageError {
    /// Key is empty or would escape the backend's root.
    InvalidKey(String),
    Io(std::io::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::Io(err) => write!(f, "storage io error: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidKey(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Key-value port the stores persist through.
///
/// One JSON document lives under each key and `set` replaces it whole.
/// Implementations must report a missing key as `Ok(None)`.
pub trait StoragePort {
    /// Reads the full document stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the full document stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Lets a caller lend one backend to several stores in turn.
impl<S: StoragePort + ?Sized> StoragePort for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}
