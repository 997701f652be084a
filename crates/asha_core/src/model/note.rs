//! Note domain record.
//!
//! # Responsibility
//! - Define the immutable note shape shared by store and handlers.
//!
//! # Invariants
//! - `id` is unique and strictly increasing in insertion order.
//! - `content` is non-empty and trimmed when created through the service.
//! - Notes are never mutated in place; they are created and removed.

use serde::{Deserialize, Serialize};

/// Stable identifier for a note, derived from a millisecond timestamp.
pub type NoteId = i64;

/// One saved note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Monotonic timestamp-derived id; insertion order equals id order.
    pub id: NoteId,
    /// Trimmed, non-empty note text with original casing preserved.
    pub content: String,
    /// Creation timestamp formatted for display, e.g. "07 Aug 2026, 09:14 AM".
    pub created_at: String,
}
