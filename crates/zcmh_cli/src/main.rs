//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `zcmh_core` linkage and the in-memory journal store.
//! - Keep output deterministic apart from the version line.

use zcmh_core::db::open_db_in_memory;
use zcmh_core::format::format_playback_time;
use zcmh_core::model::music::builtin_catalog;
use zcmh_core::{JournalRepository, SqliteJournalRepository};

fn main() {
    println!("zcmh_core ping={}", zcmh_core::ping());
    println!("zcmh_core version={}", zcmh_core::core_version());
    println!("catalog tracks={}", builtin_catalog().len());
    println!("format_playback_time(3725000)={}", format_playback_time(3_725_000));

    let entries = open_db_in_memory()
        .map_err(|err| err.to_string())
        .and_then(|conn| {
            SqliteJournalRepository::new(&conn)
                .list_entries()
                .map(|entries| entries.len())
                .map_err(|err| err.to_string())
        });
    match entries {
        Ok(count) => println!("journal store=ok entries={count}"),
        Err(err) => {
            eprintln!("journal store=error {err}");
            std::process::exit(1);
        }
    }
}
