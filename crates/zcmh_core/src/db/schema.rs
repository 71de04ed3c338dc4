//! Journal store schema history.
//!
//! Step `n` of [`STEPS`] upgrades a store from `user_version = n` to `n + 1`,
//! so the version list is dense and ordered by construction.
//!
//! # Invariants
//! - A store is upgraded in one transaction or not at all.
//! - A store written by a newer build is never touched.
//! - A store at the current version always holds `journal_entries`.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const STEPS: &[&str] = &[include_str!("journal_v1.sql")];

/// Schema version this build writes.
pub const JOURNAL_SCHEMA_VERSION: u32 = STEPS.len() as u32;

/// Schema version this build writes; same as [`JOURNAL_SCHEMA_VERSION`].
pub fn latest_version() -> u32 {
    JOURNAL_SCHEMA_VERSION
}

/// Brings the journal store on `conn` up to [`JOURNAL_SCHEMA_VERSION`].
pub(crate) fn upgrade_journal_store(conn: &mut Connection) -> DbResult<()> {
    let found = stored_version(conn)?;
    if found > JOURNAL_SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: found,
            latest_supported: JOURNAL_SCHEMA_VERSION,
        });
    }

    if found < JOURNAL_SCHEMA_VERSION {
        let tx = conn.transaction()?;
        for (version, sql) in (found + 1..).zip(&STEPS[found as usize..]) {
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", version)?;
        }
        tx.commit()?;
        info!(
            "event=db_migrate module=db status=ok from_version={found} to_version={JOURNAL_SCHEMA_VERSION}"
        );
    }

    if !journal_table_present(conn)? {
        return Err(DbError::MissingJournalTable {
            db_version: JOURNAL_SCHEMA_VERSION,
        });
    }
    Ok(())
}

fn stored_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

fn journal_table_present(conn: &Connection) -> DbResult<bool> {
    let present = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'journal_entries');",
        [],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(present)
}
