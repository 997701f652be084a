//! Note persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the load/save boundary the note service builds on.
//! - Keep SQL details inside the persistence layer.
//!
//! # Invariants
//! - `save` replaces the full stored sequence in one transaction.
//! - `load` returns notes ordered by id ascending (insertion order).

use crate::db::DbError;
use crate::model::note::Note;
use rusqlite::{params, Connection, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for note load/save operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Note persistence collaborator: an ordered sequence with last-save-wins
/// semantics.
pub trait NoteRepository: Send {
    /// Loads the full stored sequence, ordered by id ascending.
    fn load(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the full stored sequence.
    fn save(&mut self, notes: &[Note]) -> RepoResult<()>;
}

/// SQLite-backed note repository over a migrated connection.
pub struct SqliteNoteRepository {
    conn: Connection,
}

impl SqliteNoteRepository {
    /// Wraps a connection produced by `db::open_db`/`db::open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository {
    fn load(&self) -> RepoResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, content, created_at FROM notes ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            let note = Note {
                id: row.get("id")?,
                content: row.get("content")?,
                created_at: row.get("created_at")?,
            };
            if note.content.trim().is_empty() {
                return Err(RepoError::InvalidData(format!(
                    "empty content in notes row id={}",
                    note.id
                )));
            }
            notes.push(note);
        }
        Ok(notes)
    }

    fn save(&mut self, notes: &[Note]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM notes;", [])?;
        for note in notes {
            tx.execute(
                "INSERT INTO notes (id, content, created_at) VALUES (?1, ?2, ?3);",
                params![note.id, note.content.as_str(), note.created_at.as_str()],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}
