//! Flat template store.
//!
//! # Responsibility
//! - Own the ordered template list and keep it written through to the
//!   durable store under one fixed key.
//! - Provide CRUD, tag aggregation, substring search, clipboard copy, and
//!   dated backup export over that list.
//!
//! # Invariants
//! - The list reads oldest-first: creation appends at the tail.
//! - Template ids are `tmpl-<tick>` and unique within the list.
//! - The durable document is the bare template array; the bundled default
//!   dataset and export payloads wrap it as `{"templates": [...]}`.

use crate::clipboard::Clipboard;
use crate::clock::MonotonicMillis;
use crate::export::{backup_file_name, write_backup, ExportError};
use crate::model::template::{Template, TemplateDraft, TemplatePatch};
use crate::search::{contains_ci, normalize_query};
use crate::storage::StoragePort;
use crate::store::{LoadOutcome, PersistOutcome};
use log::{debug, error, info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Durable-store key holding the serialized template array.
pub const TEMPLATES_STORAGE_KEY: &str = "templates-data";

const BACKUP_PREFIX: &str = "templates-backup";
const TEMPLATE_ID_PREFIX: &str = "tmpl";

static DEFAULT_TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    let document: TemplateDocument =
        serde_json::from_str(include_str!("../../data/default_templates.json"))
            .expect("valid bundled templates dataset");
    document.templates
});

/// Wrapper shape of the bundled dataset and of export payloads.
#[derive(Debug, Serialize, Deserialize)]
struct TemplateDocument {
    templates: Vec<Template>,
}

/// In-memory template store with write-through persistence.
pub struct TemplateStore<P: StoragePort> {
    port: P,
    templates: Vec<Template>,
    clock: MonotonicMillis,
    initialized: bool,
}

impl<P: StoragePort> TemplateStore<P> {
    /// Creates the store and immediately loads its collection.
    pub fn new(port: P) -> Self {
        let mut store = Self {
            port,
            templates: Vec::new(),
            clock: MonotonicMillis::new(),
            initialized: false,
        };
        store.load();
        store
    }

    /// Reads the template array from the durable store, falling back to
    /// the bundled defaults on a missing key, a read error, or a malformed
    /// document.
    ///
    /// Infallible and idempotent; always leaves the store initialized.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = match self.port.get(TEMPLATES_STORAGE_KEY) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(templates) => {
                    self.templates = templates;
                    LoadOutcome::FromStorage
                }
                Err(err) => {
                    warn!(
                        "event=store_load module=templates status=fallback reason=malformed error={err}"
                    );
                    self.templates = DEFAULT_TEMPLATES.clone();
                    LoadOutcome::FromDefaults
                }
            },
            Ok(None) => {
                self.templates = DEFAULT_TEMPLATES.clone();
                LoadOutcome::FromDefaults
            }
            Err(err) => {
                warn!(
                    "event=store_load module=templates status=fallback reason=read_error error={err}"
                );
                self.templates = DEFAULT_TEMPLATES.clone();
                LoadOutcome::FromDefaults
            }
        };
        self.initialized = true;
        info!(
            "event=store_load module=templates status=ok source={} templates={}",
            outcome.as_log_str(),
            self.templates.len()
        );
        outcome
    }

    /// Serializes the bare template array under [`TEMPLATES_STORAGE_KEY`].
    ///
    /// Failures are logged and reported, never escalated: in-memory state
    /// stays authoritative.
    pub fn persist(&mut self) -> PersistOutcome {
        let payload = match serde_json::to_string(&self.templates) {
            Ok(payload) => payload,
            Err(err) => {
                error!(
                    "event=store_persist module=templates status=error stage=serialize error={err}"
                );
                return PersistOutcome::Failed;
            }
        };

        match self.port.set(TEMPLATES_STORAGE_KEY, &payload) {
            Ok(()) => {
                debug!(
                    "event=store_persist module=templates status=ok bytes={}",
                    payload.len()
                );
                PersistOutcome::Persisted
            }
            Err(err) => {
                error!(
                    "event=store_persist module=templates status=error stage=write error={err}"
                );
                PersistOutcome::Failed
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the full list, oldest first.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Returns every distinct tag across the list, sorted ascending.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags = BTreeSet::new();
        for template in &self.templates {
            for tag in &template.tags {
                tags.insert(tag.clone());
            }
        }
        tags.into_iter().collect()
    }

    pub fn get_by_id(&self, template_id: &str) -> Option<&Template> {
        self.templates
            .iter()
            .find(|template| template.id == template_id)
    }

    /// Creates a template at the tail of the list.
    ///
    /// Returns a clone of the created template.
    pub fn add_template(&mut self, draft: TemplateDraft) -> Template {
        let tick = self.clock.next();
        let template = Template::from_draft(template_id(tick), draft, tick);
        self.templates.push(template.clone());
        self.persist();
        debug!(
            "event=template_add module=templates id={}",
            template.id
        );
        template
    }

    /// Merges `patch` into the matching template and stamps its update
    /// time. Returns false without touching storage when the id is unknown.
    pub fn update_template(&mut self, template_id: &str, patch: TemplatePatch) -> bool {
        let Some(template) = self
            .templates
            .iter_mut()
            .find(|template| template.id == template_id)
        else {
            return false;
        };
        template.apply(patch, self.clock.next());
        self.persist();
        debug!("event=template_update module=templates id={template_id}");
        true
    }

    /// Deletes the matching template. Returns false without touching
    /// storage when the id is unknown.
    pub fn delete_template(&mut self, template_id: &str) -> bool {
        let Some(index) = self
            .templates
            .iter()
            .position(|template| template.id == template_id)
        else {
            return false;
        };
        self.templates.remove(index);
        self.persist();
        debug!("event=template_delete module=templates id={template_id}");
        true
    }

    /// Searches for templates whose title, description, any tag, or
    /// content contains `query`, preserving list order.
    ///
    /// A blank query returns the full list unfiltered.
    pub fn search_templates(&self, query: &str) -> Vec<&Template> {
        let Some(needle) = normalize_query(query) else {
            return self.templates.iter().collect();
        };

        self.templates
            .iter()
            .filter(|template| {
                contains_ci(&template.title, &needle)
                    || contains_ci(&template.description, &needle)
                    || template.tags.iter().any(|tag| contains_ci(tag, &needle))
                    || contains_ci(&template.content, &needle)
            })
            .collect()
    }

    /// Copies the matching template's content through the clipboard chain.
    ///
    /// Returns false when the id is unknown or every strategy fails.
    pub fn copy_to_clipboard(&self, template_id: &str, clipboard: &mut Clipboard) -> bool {
        let Some(template) = self.get_by_id(template_id) else {
            debug!("event=clipboard_copy module=templates status=miss id={template_id}");
            return false;
        };
        clipboard.copy(&template.content)
    }

    /// Writes the wrapped list as pretty JSON to
    /// `<dir>/templates-backup-<YYYY-MM-DD>.json` and returns the path.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let document = TemplateDocument {
            templates: self.templates.clone(),
        };
        let payload = serde_json::to_string_pretty(&document)?;
        let path = write_backup(dir, &backup_file_name(BACKUP_PREFIX), &payload)?;
        info!(
            "event=export module=templates status=ok path={}",
            path.display()
        );
        Ok(path)
    }
}

fn template_id(tick_ms: i64) -> String {
    format!("{TEMPLATE_ID_PREFIX}-{tick_ms}")
}
