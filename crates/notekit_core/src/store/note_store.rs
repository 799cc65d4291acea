//! Category-keyed note store.
//!
//! # Responsibility
//! - Own the category-to-notes mapping and keep it written through to the
//!   durable store under one fixed key.
//! - Provide CRUD, category management, substring search, and dated backup
//!   export over that mapping.
//!
//! # Invariants
//! - Every note belongs to exactly one category; there is no move
//!   operation.
//! - Categories iterate in insertion order.
//! - Lists read newest-first: creation inserts at the head.
//! - Note ids are `<category-slug>-<tick>` and unique within their list.

use crate::clock::MonotonicMillis;
use crate::export::{backup_file_name, write_backup, ExportError};
use crate::model::note::{Note, NoteDraft, NotePatch};
use crate::search::{contains_ci, normalize_query};
use crate::storage::StoragePort;
use crate::store::{LoadOutcome, PersistOutcome};
use indexmap::IndexMap;
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Durable-store key holding the serialized category mapping.
pub const NOTES_STORAGE_KEY: &str = "notes-data";

const BACKUP_PREFIX: &str = "notes-backup";

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static DEFAULT_NOTES: Lazy<NoteCollection> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/default_notes.json"))
        .expect("valid bundled notes dataset")
});

/// Full mapping shape persisted under [`NOTES_STORAGE_KEY`].
pub type NoteCollection = IndexMap<String, Vec<Note>>;

/// Category listing entry: name plus current note count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}

/// In-memory note store with write-through persistence.
pub struct NoteStore<P: StoragePort> {
    port: P,
    notes: NoteCollection,
    clock: MonotonicMillis,
    initialized: bool,
}

impl<P: StoragePort> NoteStore<P> {
    /// Creates the store and immediately loads its collection.
    pub fn new(port: P) -> Self {
        let mut store = Self {
            port,
            notes: NoteCollection::new(),
            clock: MonotonicMillis::new(),
            initialized: false,
        };
        store.load();
        store
    }

    /// Reads the collection from the durable store, falling back to the
    /// bundled defaults on a missing key, a read error, or a malformed
    /// document.
    ///
    /// Infallible and idempotent; always leaves the store initialized.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.port.get(NOTES_STORAGE_KEY) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(collection) => {
                    self.notes = collection;
                    LoadOutcome::FromStorage
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=notes status=fallback reason=malformed error={err}"
                    );
                    self.notes = DEFAULT_NOTES.clone();
                    LoadOutcome::FromDefaults
                }
            },
            Ok(None) => {
                self.notes = DEFAULT_NOTES.clone();
                LoadOutcome::FromDefaults
            }
            Err(err) => {
                warn!(
                    "event=store_load module=notes status=fallback reason=read_error error={err}"
                );
                self.notes = DEFAULT_NOTES.clone();
                LoadOutcome::FromDefaults
            }
        };
        self.initialized = true;
        info!(
            "event=store_load module=notes status=ok source={} categories={} notes={}",
            outcome.as_log_str(),
            self.notes.len(),
            self.total_count()
        );
        outcome
    }

    /// Serializes the whole mapping under [`NOTES_STORAGE_KEY`].
    ///
    /// Failures are logged and reported, never escalated: in-memory state
    /// stays authoritative.
    pub fn persist(&mut self) -> PersistOutcome {
        let payload = match serde_json::to_string(&self.notes) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=store_persist module=notes status=error stage=serialize error={err}"
                );
                return PersistOutcome::Failed;
            }
        };

        match self.port.set(NOTES_STORAGE_KEY, &payload) {
            Ok(()) => {
                debug!(
                    "event=store_persist module=notes status=ok bytes={}",
                    payload.len()
                );
                PersistOutcome::Persisted
            }
            Err(err) => {
                error!("event=store_persist module=notes status=error stage=write error={err}");
                PersistOutcome::Failed
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Lists every category with its note count, in insertion order.
    pub fn list_categories(&self) -> Vec<CategorySummary> {
        self.notes
            .iter()
            .map(|(name, list)| CategorySummary {
                name: name.clone(),
                count: list.len(),
            })
            .collect()
    }

    /// Lists category names in insertion order.
    pub fn category_names(&self) -> Vec<String> {
        self.notes.keys().cloned().collect()
    }

    /// Returns the notes of `category`, newest first.
    ///
    /// Unknown categories read as an empty list. The shared borrow is the
    /// write guard: callers cannot mutate past the store's persistence.
    pub fn notes_in(&self, category: &str) -> &[Note] {
        self.notes.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total note count across all categories.
    pub fn total_count(&self) -> usize {
        self.notes.values().map(Vec::len).sum()
    }

    /// Creates a note in `category`, creating the category on demand.
    ///
    /// The note is inserted at the head so lists read newest-first.
    /// Returns a clone of the created note.
    pub fn add_note(&mut self, category: &str, draft: NoteDraft) -> Note {
        let tick = self.clock.next();
        let note = Note::from_draft(note_id(category, tick), draft, tick);
        self.notes
            .entry(category.to_string())
            .or_default()
            .insert(0, note.clone());
        self.persist();
        debug!(
            "event=note_add module=notes category={category} id={}",
            note.id
        );
        note
    }

    /// Deletes `note_id` from `category`.
    ///
    /// Returns false without touching storage when the category or the id
    /// is unknown. The category key stays even when its list empties.
    pub fn delete_note(&mut self, category: &str, note_id: &str) -> bool {
        let Some(list) = self.notes.get_mut(category) else {
            return false;
        };
        let Some(index) = list.iter().position(|note| note.id == note_id) else {
            return false;
        };
        list.remove(index);
        self.persist();
        debug!("event=note_delete module=notes category={category} id={note_id}");
        true
    }

    /// Merges `patch` into the matching note and stamps its update time.
    ///
    /// Returns false without touching storage when the category or the id
    /// is unknown.
    pub fn update_note(&mut self, category: &str, note_id: &str, patch: NotePatch) -> bool {
        let Some(list) = self.notes.get_mut(category) else {
            return false;
        };
        let Some(note) = list.iter_mut().find(|note| note.id == note_id) else {
            return false;
        };
        note.apply(patch, self.clock.next());
        self.persist();
        debug!("event=note_update module=notes category={category} id={note_id}");
        true
    }

    /// Searches one category for notes whose title or content contains
    /// `query`, preserving list order.
    ///
    /// `None` or an unknown category yields no hits; a blank query returns
    /// the category's full list unfiltered.
    pub fn search_notes(&self, category: Option<&str>, query: &str) -> Vec<&Note> {
        let Some(list) = category.and_then(|name| self.notes.get(name)) else {
            return Vec::new();
        };

        let Some(needle) = normalize_query(query) else {
            return list.iter().collect();
        };

        list.iter()
            .filter(|note| {
                contains_ci(&note.title, &needle) || contains_ci(&note.content, &needle)
            })
            .collect()
    }

    /// Creates an empty category.
    ///
    /// Returns true and persists exactly once when the name was new, false
    /// without any write when it already existed.
    pub fn add_category(&mut self, name: &str) -> bool {
        if self.notes.contains_key(name) {
            return false;
        }
        self.notes.insert(name.to_string(), Vec::new());
        self.persist();
        debug!("event=category_add module=notes name={name}");
        true
    }

    /// Writes the full mapping as pretty JSON to
    /// `<dir>/notes-backup-<YYYY-MM-DD>.json` and returns the path.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let payload = serde_json::to_string_pretty(&self.notes)?;
        let path = write_backup(dir, &backup_file_name(BACKUP_PREFIX), &payload)?;
        info!(
            "event=export module=notes status=ok path={}",
            path.display()
        );
        Ok(path)
    }
}

/// Slugifies a category name for id generation: lowercased, every
/// whitespace run collapsed to one hyphen.
pub fn category_slug(category: &str) -> String {
    WHITESPACE_RUN_RE
        .replace_all(&category.to_lowercase(), "-")
        .into_owned()
}

fn note_id(category: &str, tick_ms: i64) -> String {
    format!("{}-{tick_ms}", category_slug(category))
}

#[cfg(test)]
mod tests {
    use super::{category_slug, note_id};

    #[test]
    fn slug_lowercases_and_collapses_whitespace() {
        assert_eq!(category_slug("Shell Tricks"), "shell-tricks");
        assert_eq!(category_slug("a  \t b"), "a-b");
        assert_eq!(category_slug("Linux"), "linux");
    }

    #[test]
    fn slug_keeps_leading_and_trailing_runs_as_hyphens() {
        assert_eq!(category_slug(" edge "), "-edge-");
    }

    #[test]
    fn note_ids_join_slug_and_tick() {
        assert_eq!(note_id("Shell Tricks", 42), "shell-tricks-42");
    }
}
