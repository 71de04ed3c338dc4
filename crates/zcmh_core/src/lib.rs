//! Core domain logic for the ZCMH wellbeing app.
//! This crate is the single source of truth for business invariants; host
//! services are reached only through the traits in [`platform`].

pub mod alarm;
pub mod config;
pub mod consult;
pub mod db;
pub mod format;
pub mod logging;
pub mod model;
pub mod platform;
pub mod playback;
pub mod repo;
pub mod service;
pub mod state;

pub use alarm::{AlarmController, AlarmError, AlarmReceiver, AlarmResult, AlarmSignal};
pub use config::AppConfig;
pub use consult::{open_consultation, whatsapp_url, ConsultationTopic, LinkError, LinkOutcome};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::alarm::AlarmSettings;
pub use model::journal::{EntryId, JournalEntry, JournalValidationError, NewJournalEntry};
pub use model::music::{builtin_catalog, AudioResource, MusicCategory, MusicTrack};
pub use playback::{MusicCommand, MusicCommandRelay, PlaybackController, PlaybackState};
pub use repo::journal_repo::{
    JournalRepository, RepoError, RepoResult, SqliteJournalRepository,
};
pub use service::journal_service::{JournalService, JournalServiceError};
pub use state::Observable;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
