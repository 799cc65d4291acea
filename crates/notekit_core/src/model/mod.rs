//! Domain models for the two store collections.
//!
//! # Responsibility
//! - Define the note and template records together with their typed
//!   draft/patch inputs.
//!
//! # Invariants
//! - Records serialize with the camelCase field names of the durable JSON
//!   documents.
//! - Partial updates are explicit structs; only `Some` fields merge.

pub mod note;
pub mod template;
