//! Free-text matching helpers shared by the store search operations.
//!
//! # Responsibility
//! - Normalize raw queries the same way for both stores.
//! - Provide case-insensitive substring matching.
//!
//! # Invariants
//! - A blank query (empty or whitespace-only) normalizes to `None`, which
//!   stores read as "return the full list unfiltered".
//! - Matching lowercases both sides, so it is case-insensitive regardless
//!   of how the caller spells the query.

/// Normalizes a raw query: trims, lowercases, and drops blank input.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Returns whether `haystack` contains the already-lowercased needle.
pub fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[cfg(test)]
mod tests {
    use super::{contains_ci, normalize_query};

    #[test]
    fn blank_queries_normalize_to_none() {
        assert!(normalize_query("").is_none());
        assert!(normalize_query("   ").is_none());
        assert!(normalize_query("\t\n").is_none());
    }

    #[test]
    fn queries_are_trimmed_and_lowercased() {
        assert_eq!(normalize_query("  Grep  "), Some("grep".to_string()));
    }

    #[test]
    fn matching_ignores_case_on_both_sides() {
        assert!(contains_ci("Docker Compose", "compose"));
        assert!(contains_ci("docker compose", "cker c"));
        assert!(!contains_ci("docker", "podman"));
    }
}
