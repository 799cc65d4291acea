//! Millisecond tick source for id generation and update stamps.
//!
//! # Responsibility
//! - Produce strictly increasing epoch-millisecond values per store.
//!
//! # Invariants
//! - `next` never returns the same value twice, even when the wall clock
//!   stalls or steps backwards.

use chrono::Utc;

/// Returns the current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Strictly increasing epoch-millisecond source.
///
/// Ids embed their creation time, so two creations inside the same
/// millisecond must still get distinct values; the tick advances by at
/// least one on every call.
#[derive(Debug, Default)]
pub struct MonotonicMillis {
    last_ms: i64,
}

impl MonotonicMillis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next tick: the wall clock when it advanced, otherwise
    /// the previous tick plus one.
    pub fn next(&mut self) -> i64 {
        self.last_ms = now_ms().max(self.last_ms + 1);
        self.last_ms
    }
}
