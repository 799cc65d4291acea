use notekit_core::{
    LoadOutcome, MemoryStorage, NoteDraft, NotePatch, NoteStore, NOTES_STORAGE_KEY,
};

/// Store over a pre-seeded empty mapping, so tests start without the
/// bundled defaults.
fn empty_store() -> NoteStore<MemoryStorage> {
    NoteStore::new(MemoryStorage::with_value(NOTES_STORAGE_KEY, "{}"))
}

#[test]
fn add_note_inserts_at_the_head_of_its_category() {
    let mut store = empty_store();
    let first = store.add_note("Linux", NoteDraft::new("first", "a"));
    let second = store.add_note("Linux", NoteDraft::new("second", "b"));

    let listed = store.notes_in("Linux");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[test]
fn add_note_creates_the_category_on_demand() {
    let mut store = empty_store();
    assert!(store.category_names().is_empty());

    store.add_note("Fresh", NoteDraft::new("t", "c"));

    assert_eq!(store.category_names(), vec!["Fresh"]);
    assert_eq!(store.notes_in("Fresh").len(), 1);
}

#[test]
fn note_ids_embed_the_category_slug_and_stay_unique() {
    let mut store = empty_store();
    let first = store.add_note("Shell Tricks", NoteDraft::new("a", "a"));
    let second = store.add_note("Shell Tricks", NoteDraft::new("b", "b"));

    assert!(first.id.starts_with("shell-tricks-"));
    assert!(second.id.starts_with("shell-tricks-"));
    assert_ne!(first.id, second.id);
}

#[test]
fn created_notes_carry_a_creation_stamp_and_no_update_stamp() {
    let mut store = empty_store();
    let note = store.add_note("Linux", NoteDraft::new("t", "c"));

    assert!(note.created_at > 0);
    assert!(note.updated_at.is_none());
}

#[test]
fn list_categories_preserves_insertion_order_and_counts() {
    let mut store = empty_store();
    store.add_category("First");
    store.add_note("Second", NoteDraft::new("t", "c"));
    store.add_category("Third");

    let summaries = store.list_categories();
    let names: Vec<_> = summaries.iter().map(|s| s.name.as_str()).collect();
    let counts: Vec<_> = summaries.iter().map(|s| s.count).collect();

    assert_eq!(names, vec!["First", "Second", "Third"]);
    assert_eq!(counts, vec![0, 1, 0]);
}

#[test]
fn empty_categories_appear_in_listings() {
    let mut store = empty_store();
    store.add_category("Empty");

    assert_eq!(store.category_names(), vec!["Empty"]);
    assert!(store.notes_in("Empty").is_empty());
    assert_eq!(store.total_count(), 0);
}

#[test]
fn delete_note_removes_only_the_target() {
    let mut store = empty_store();
    let keep = store.add_note("Linux", NoteDraft::new("keep", "k"));
    let gone = store.add_note("Linux", NoteDraft::new("gone", "g"));

    assert!(store.delete_note("Linux", &gone.id));

    let listed = store.notes_in("Linux");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, keep.id);
}

#[test]
fn delete_note_keeps_the_emptied_category_key() {
    let mut store = empty_store();
    let note = store.add_note("Linux", NoteDraft::new("t", "c"));

    assert!(store.delete_note("Linux", &note.id));

    assert!(store.notes_in("Linux").is_empty());
    assert_eq!(store.category_names(), vec!["Linux"]);
}

#[test]
fn delete_note_with_unknown_category_or_id_returns_false() {
    let mut store = empty_store();
    let note = store.add_note("Linux", NoteDraft::new("t", "c"));

    assert!(!store.delete_note("Git", &note.id));
    assert!(!store.delete_note("Linux", "linux-0"));
    assert_eq!(store.notes_in("Linux").len(), 1);
}

#[test]
fn update_note_merges_the_patch_and_stamps_the_update() {
    let mut store = empty_store();
    let note = store.add_note("Linux", NoteDraft::new("title", "content"));

    let updated = store.update_note(
        "Linux",
        &note.id,
        NotePatch {
            content: Some("changed".to_string()),
            ..NotePatch::default()
        },
    );
    assert!(updated);

    let stored = &store.notes_in("Linux")[0];
    assert_eq!(stored.title, "title");
    assert_eq!(stored.content, "changed");
    assert_eq!(stored.created_at, note.created_at);
    assert!(stored.updated_at.unwrap() > stored.created_at);
}

#[test]
fn update_note_with_unknown_id_returns_false() {
    let mut store = empty_store();
    store.add_note("Linux", NoteDraft::new("t", "c"));

    assert!(!store.update_note("Linux", "linux-0", NotePatch::default()));
    assert!(!store.update_note("Git", "git-0", NotePatch::default()));
}

#[test]
fn search_matches_title_and_content_case_insensitively() {
    let mut store = empty_store();
    store.add_note("Linux", NoteDraft::new("Disk usage", "du -sh"));
    store.add_note("Linux", NoteDraft::new("logs", "journalctl -F"));

    let by_title = store.search_notes(Some("Linux"), "DISK");
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Disk usage");

    let by_content = store.search_notes(Some("Linux"), "journalctl");
    assert_eq!(by_content.len(), 1);
    assert_eq!(by_content[0].title, "logs");
}

#[test]
fn blank_query_returns_the_full_category_list_in_order() {
    let mut store = empty_store();
    let first = store.add_note("Linux", NoteDraft::new("a", "a"));
    let second = store.add_note("Linux", NoteDraft::new("b", "b"));

    let hits = store.search_notes(Some("Linux"), "   ");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, second.id);
    assert_eq!(hits[1].id, first.id);
}

#[test]
fn search_without_a_category_returns_nothing() {
    let mut store = empty_store();
    store.add_note("Linux", NoteDraft::new("match", "match"));

    assert!(store.search_notes(None, "match").is_empty());
    assert!(store.search_notes(Some("Git"), "match").is_empty());
}

#[test]
fn add_category_reports_whether_the_name_was_new() {
    let mut store = empty_store();
    assert!(store.add_category("Linux"));
    assert!(!store.add_category("Linux"));
    assert_eq!(store.category_names(), vec!["Linux"]);
}

#[test]
fn empty_storage_installs_the_bundled_defaults() {
    let mut store = NoteStore::new(MemoryStorage::new());

    assert!(store.is_initialized());
    assert!(store.total_count() > 0);
    assert!(!store.category_names().is_empty());
    assert_eq!(store.load(), LoadOutcome::FromDefaults);
}

#[test]
fn note_lifecycle_end_to_end() {
    let mut store = empty_store();

    let note = store.add_note("Linux", NoteDraft::new("Cmd", "ls -la"));
    assert!(note.id.starts_with("linux-"));

    let summaries = store.list_categories();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "Linux");
    assert_eq!(summaries[0].count, 1);

    let hits = store.search_notes(Some("Linux"), "ls");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, note.id);

    assert!(store.delete_note("Linux", &note.id));
    assert!(store.notes_in("Linux").is_empty());
    assert_eq!(store.category_names(), vec!["Linux"]);
}
