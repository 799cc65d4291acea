//! Template record and its typed inputs.
//!
//! # Responsibility
//! - Define the reusable snippet record kept in the flat template list.
//! - Normalize tag lists into ordered sets.
//!
//! # Invariants
//! - `id` is `tmpl-<epoch-ms>` and never changes afterwards.
//! - `tags` holds no duplicates; the first occurrence wins and original
//!   casing is kept.
//! - `updated_at` stays `None` until the first update and is omitted from
//!   serialized output while absent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reusable text snippet with searchable metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable id of the form `tmpl-<epoch-ms>`.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered tag set; first occurrence wins, original casing kept.
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Last update time in epoch milliseconds, absent until the first update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

/// Typed input for creating one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDraft {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub content: String,
}

/// Explicit partial update for one template.
///
/// A `Some` tag list replaces the whole set after deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub content: Option<String>,
}

impl Template {
    /// Creates a template from its draft with a store-assigned id and
    /// timestamp. Draft tags are deduplicated.
    pub fn from_draft(id: impl Into<String>, draft: TemplateDraft, created_at_ms: i64) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            tags: dedup_tags(draft.tags),
            content: draft.content,
            created_at: created_at_ms,
            updated_at: None,
        }
    }

    /// Merges the patch into this template and stamps the update time.
    pub fn apply(&mut self, patch: TemplatePatch, updated_at_ms: i64) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(tags) = patch.tags {
            self.tags = dedup_tags(tags);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = Some(updated_at_ms);
    }
}

/// Drops duplicate tags, keeping first occurrences in their original order.
pub fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut unique = Vec::with_capacity(tags.len());
    for tag in tags {
        if seen.insert(tag.clone()) {
            unique.push(tag);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::{dedup_tags, Template, TemplateDraft, TemplatePatch};

    fn draft() -> TemplateDraft {
        TemplateDraft {
            title: "title".to_string(),
            description: "description".to_string(),
            tags: vec!["rust".to_string(), "cli".to_string(), "rust".to_string()],
            content: "content".to_string(),
        }
    }

    #[test]
    fn from_draft_dedups_tags_in_order() {
        let template = Template::from_draft("tmpl-1", draft(), 1);
        assert_eq!(template.tags, vec!["rust", "cli"]);
        assert!(template.updated_at.is_none());
    }

    #[test]
    fn apply_replaces_tags_as_a_set() {
        let mut template = Template::from_draft("tmpl-1", draft(), 1);
        template.apply(
            TemplatePatch {
                tags: Some(vec!["a".to_string(), "a".to_string(), "b".to_string()]),
                ..TemplatePatch::default()
            },
            2,
        );

        assert_eq!(template.tags, vec!["a", "b"]);
        assert_eq!(template.title, "title");
        assert_eq!(template.updated_at, Some(2));
    }

    #[test]
    fn dedup_keeps_original_casing() {
        let tags = vec!["Rust".to_string(), "rust".to_string()];
        assert_eq!(dedup_tags(tags), vec!["Rust", "rust"]);
    }

    #[test]
    fn missing_tags_deserialize_as_empty() {
        let json = r#"{
            "id": "tmpl-1",
            "title": "t",
            "description": "d",
            "content": "c",
            "createdAt": 1
        }"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert!(template.tags.is_empty());
    }
}
