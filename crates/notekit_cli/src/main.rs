//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `notekit_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use notekit_core::{MemoryStorage, NoteStore, TemplateStore};

fn main() {
    let notes = NoteStore::new(MemoryStorage::new());
    let templates = TemplateStore::new(MemoryStorage::new());

    println!("notekit_core version={}", notekit_core::core_version());
    println!(
        "default dataset categories={} notes={} templates={}",
        notes.list_categories().len(),
        notes.total_count(),
        templates.count()
    );
    println!("template tags={}", templates.all_tags().join(","));
}
