//! Collection stores and their shared outcome types.
//!
//! # Responsibility
//! - Own the in-memory collections and write them through a storage port.
//! - Express recoverable persistence conditions as explicit outcomes
//!   instead of errors.
//!
//! # Invariants
//! - Load never fails: any read or parse problem falls back to the bundled
//!   default dataset.
//! - Every successful mutation persists the whole collection; a failed
//!   persist never rolls back in-memory state.
//!
//! # See also
//! - `crate::storage` for the port the stores write through.

pub mod note_store;
pub mod template_store;

/// Where a store's collection came from on the last load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Parsed from the document under the store's durable key.
    FromStorage,
    /// Installed from the bundled default dataset after a missing key, a
    /// read error, or a malformed document.
    FromDefaults,
}

/// Result of one whole-collection write to the durable store.
///
/// `Failed` is informational: in-memory state stays authoritative and the
/// triggering mutation still reports success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Persisted,
    Failed,
}

impl LoadOutcome {
    /// Stable label used in log events.
    pub fn as_log_str(self) -> &'static str {
        match self {
            Self::FromStorage => "storage",
            Self::FromDefaults => "defaults",
        }
    }
}
