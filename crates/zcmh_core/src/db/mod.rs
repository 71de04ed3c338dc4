//! Journal store: the single SQLite file holding diary entries.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - Nothing reads or writes entries on a connection that failed
//!   [`open_db`]; a returned connection is always at the current schema.
//! - Writes are serialized by the single connection.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::JOURNAL_SCHEMA_VERSION;

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or upgrading the journal store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer build; it is left untouched.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The file claims the current schema but has no entries table.
    MissingJournalTable { db_version: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "journal store error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "journal store schema v{db_version} is newer than this build supports (v{latest_supported})"
            ),
            Self::MissingJournalTable { db_version } => write!(
                f,
                "journal store at schema v{db_version} has no journal_entries table"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
