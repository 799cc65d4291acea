//! Core store logic for NoteKit.
//! This crate is the single source of truth for collection state and its
//! durable persistence contract.

pub mod clipboard;
pub mod clock;
pub mod export;
pub mod logging;
pub mod model;
pub mod search;
pub mod storage;
pub mod store;

pub use clipboard::{Clipboard, ClipboardError, ClipboardStrategy, CommandStrategy};
pub use export::ExportError;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft, NotePatch};
pub use model::template::{Template, TemplateDraft, TemplatePatch};
pub use storage::{FileStorage, MemoryStorage, StorageError, StoragePort, StorageResult};
pub use store::note_store::{CategorySummary, NoteCollection, NoteStore, NOTES_STORAGE_KEY};
pub use store::template_store::{TemplateStore, TEMPLATES_STORAGE_KEY};
pub use store::{LoadOutcome, PersistOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
