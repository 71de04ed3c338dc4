//! Journal repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `journal_entries` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate entries before SQL mutations.
//! - Lists are ordered most-recent-first: `timestamp DESC, id DESC`.
//! - Update and delete report `NotFound` when no row matches the id.

use crate::db::DbError;
use crate::model::journal::{EntryId, JournalEntry, JournalValidationError, NewJournalEntry};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    date,
    timestamp
FROM journal_entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for journal persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(JournalValidationError),
    Db(DbError),
    NotFound(EntryId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "journal entry not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<JournalValidationError> for RepoError {
    fn from(value: JournalValidationError) -> Self {
        Self::Validation(value)
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

/// Repository interface for journal entry CRUD operations.
pub trait JournalRepository {
    /// Inserts one entry and returns the store-assigned id.
    fn insert_entry(&self, entry: &NewJournalEntry) -> RepoResult<EntryId>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>>;
    /// Lists all entries, most recent first.
    fn list_entries(&self) -> RepoResult<Vec<JournalEntry>>;
    /// Replaces every mutable column of the entry with matching id.
    fn update_entry(&self, entry: &JournalEntry) -> RepoResult<()>;
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
    /// Removes every entry and returns the number of deleted rows.
    fn delete_all_entries(&self) -> RepoResult<usize>;
}

/// SQLite-backed journal repository.
pub struct SqliteJournalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteJournalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl JournalRepository for SqliteJournalRepository<'_> {
    fn insert_entry(&self, entry: &NewJournalEntry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO journal_entries (
                title,
                content,
                date,
                timestamp
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.title.as_str(),
                entry.content.as_str(),
                entry.date.as_str(),
                entry.timestamp,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_entry_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn list_entries(&self) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} ORDER BY timestamp DESC, id DESC;"))?;
        let entries = stmt
            .query_map([], parse_entry_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn update_entry(&self, entry: &JournalEntry) -> RepoResult<()> {
        entry.validate()?;

        let changed = self.conn.execute(
            "UPDATE journal_entries
             SET
                title = ?1,
                content = ?2,
                date = ?3,
                timestamp = ?4
             WHERE id = ?5;",
            params![
                entry.title.as_str(),
                entry.content.as_str(),
                entry.date.as_str(),
                entry.timestamp,
                entry.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(entry.id));
        }

        Ok(())
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM journal_entries WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_all_entries(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM journal_entries;", [])?;
        Ok(removed)
    }
}

fn parse_entry_row(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    Ok(JournalEntry {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        date: row.get("date")?,
        timestamp: row.get("timestamp")?,
    })
}
