//! Note record and its typed inputs.
//!
//! # Responsibility
//! - Define the note entry persisted inside a category list.
//! - Merge partial updates without letting unknown fields leak in.
//!
//! # Invariants
//! - `id` embeds the owning category's slug plus a creation-time
//!   millisecond tick and never changes afterwards.
//! - `updated_at` stays `None` until the first update and is omitted from
//!   serialized output while absent.

use serde::{Deserialize, Serialize};

/// Single note entry owned by exactly one category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable id of the form `<category-slug>-<epoch-ms>`.
    pub id: String,
    pub title: String,
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Last update time in epoch milliseconds, absent until the first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Typed input for creating one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

/// Explicit partial update for one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Note {
    /// Creates a note from its draft with a store-assigned id and timestamp.
    pub fn from_draft(id: impl Into<String>, draft: NoteDraft, created_at_ms: i64) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            content: draft.content,
            created_at: created_at_ms,
            updated_at: None,
        }
    }

    /// Merges the patch into this note and stamps the update time.
    ///
    /// Fields left as `None` keep their current value; `id` and
    /// `created_at` are never touched.
    pub fn apply(&mut self, patch: NotePatch, updated_at_ms: i64) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = Some(updated_at_ms);
    }
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}
