//! Note store use-case service.
//!
//! # Responsibility
//! - Own note lifecycle: add, list, remove by id, clear.
//! - Serialize all mutations behind one mutual-exclusion point.
//!
//! # Invariants
//! - Note ids are unique and strictly increasing in insertion order, even
//!   for inserts within the same millisecond.
//! - Stored content is trimmed and non-empty.
//! - Removing a missing id and clearing an empty store are no-ops.

use crate::clock::Clock;
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

const CREATED_AT_FORMAT: &str = "%d %b %Y, %I:%M %p";

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Content was empty after trimming; nothing was stored.
    EmptyContent,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content is empty"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyContent => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for NoteStoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Mutex-guarded note store shared across concurrent dispatches.
pub struct NoteService {
    repo: Mutex<Box<dyn NoteRepository>>,
    clock: Arc<dyn Clock>,
}

impl NoteService {
    /// Creates a store over the provided persistence collaborator.
    pub fn new(repo: Box<dyn NoteRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo: Mutex::new(repo),
            clock,
        }
    }

    /// Appends a note with a fresh monotonic id.
    ///
    /// # Errors
    /// - `EmptyContent` when nothing remains after trimming.
    /// - `Repo` when persistence fails; the store is left unchanged.
    pub fn add(&self, content: &str) -> Result<Note, NoteStoreError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(NoteStoreError::EmptyContent);
        }

        let mut repo = self.lock_repo();
        let mut notes = repo.load()?;
        let now = self.clock.now();
        // Same-millisecond inserts still get strictly increasing ids.
        let id = notes
            .last()
            .map_or(now.timestamp_millis(), |last| {
                now.timestamp_millis().max(last.id + 1)
            });
        let note = Note {
            id,
            content: content.to_string(),
            created_at: now.format(CREATED_AT_FORMAT).to_string(),
        };
        notes.push(note.clone());
        repo.save(&notes)?;
        info!("event=note_add module=notes status=ok id={id}");
        Ok(note)
    }

    /// Returns all notes in insertion order.
    pub fn list(&self) -> Result<Vec<Note>, NoteStoreError> {
        Ok(self.lock_repo().load()?)
    }

    /// Removes one note by id; a missing id leaves the store unchanged.
    pub fn remove(&self, id: NoteId) -> Result<(), NoteStoreError> {
        let mut repo = self.lock_repo();
        let notes = repo.load()?;
        let remaining: Vec<Note> = notes.into_iter().filter(|note| note.id != id).collect();
        repo.save(&remaining)?;
        info!("event=note_remove module=notes status=ok id={id}");
        Ok(())
    }

    /// Empties the store; idempotent.
    pub fn clear(&self) -> Result<(), NoteStoreError> {
        self.lock_repo().save(&[])?;
        info!("event=note_clear module=notes status=ok");
        Ok(())
    }

    fn lock_repo(&self) -> MutexGuard<'_, Box<dyn NoteRepository>> {
        match self.repo.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
