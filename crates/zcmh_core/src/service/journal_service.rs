//! Journal use-case service.
//!
//! # Responsibility
//! - Stamp new entries with creation time and display date.
//! - Keep a live, most-recent-first entry list for the journal screen.
//! - Provide list previews and reflection prompts.
//!
//! # Invariants
//! - The live list is refreshed after every successful write.
//! - Updates replace title/content/date/timestamp; the id never changes.

use crate::format::format_display_date;
use crate::model::journal::{EntryId, JournalEntry, NewJournalEntry};
use crate::platform::Clock;
use crate::repo::journal_repo::{JournalRepository, RepoError};
use crate::state::Observable;
use chrono::{Local, TimeZone};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const GRATITUDE_PROMPTS: [&str; 5] = [
    "Apa 3 hal kecil yang membuat saya tersenyum hari ini?",
    "Siapa yang membuat hari saya lebih baik, dan kenapa?",
    "Apa pencapaian kecil yang saya syukuri hari ini?",
    "Apa yang membuat saya merasa aman atau nyaman hari ini?",
    "Apa hal baik tentang diri saya yang saya syukuri?",
];

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalServiceError {
    /// Target entry does not exist.
    EntryNotFound(EntryId),
    /// The clock produced a time that cannot be formatted as a date.
    InvalidTimestamp(i64),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for JournalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryNotFound(id) => write!(f, "journal entry not found: {id}"),
            Self::InvalidTimestamp(value) => write!(f, "timestamp out of range: {value}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent journal state: {details}")
            }
        }
    }
}

impl Error for JournalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for JournalServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::EntryNotFound(id),
            other => Self::Repo(other),
        }
    }
}

pub type JournalServiceResult<T> = Result<T, JournalServiceError>;

/// Journal facade over a repository implementation.
pub struct JournalService<R: JournalRepository, Tz: TimeZone = Local> {
    repo: R,
    clock: Arc<dyn Clock>,
    time_zone: Tz,
    entries: Observable<Vec<JournalEntry>>,
}

impl<R: JournalRepository> JournalService<R, Local> {
    /// Creates a service formatting dates in the device time zone and loads
    /// the initial entry list.
    pub fn try_new(repo: R, clock: Arc<dyn Clock>) -> JournalServiceResult<Self> {
        Self::with_time_zone(repo, clock, Local)
    }
}

impl<R: JournalRepository, Tz: TimeZone> JournalService<R, Tz> {
    pub fn with_time_zone(
        repo: R,
        clock: Arc<dyn Clock>,
        time_zone: Tz,
    ) -> JournalServiceResult<Self> {
        let initial = repo.list_entries()?;
        Ok(Self {
            repo,
            clock,
            time_zone,
            entries: Observable::new(initial),
        })
    }

    /// Live list of entries, most recent first.
    pub fn entries(&self) -> &Observable<Vec<JournalEntry>> {
        &self.entries
    }

    /// Saves a new entry stamped with the current time.
    pub fn create_entry(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> JournalServiceResult<JournalEntry> {
        let timestamp = self.clock.now_ms();
        let date = format_display_date(timestamp, &self.time_zone)
            .ok_or(JournalServiceError::InvalidTimestamp(timestamp))?;
        let draft = NewJournalEntry {
            title: title.into(),
            content: content.into(),
            date,
            timestamp,
        };

        let id = self.repo.insert_entry(&draft).inspect_err(|err| {
            error!("event=journal_create module=journal status=error error={err}");
        })?;
        let created = self
            .repo
            .get_entry(id)?
            .ok_or(JournalServiceError::InconsistentState(
                "created entry not found in read-back",
            ))?;
        self.refresh()?;
        info!("event=journal_create module=journal status=ok id={id}");
        Ok(created)
    }

    /// Replaces a stored entry by id and returns the stored state.
    pub fn update_entry(&self, entry: &JournalEntry) -> JournalServiceResult<JournalEntry> {
        self.repo.update_entry(entry)?;
        let updated = self
            .repo
            .get_entry(entry.id)?
            .ok_or(JournalServiceError::InconsistentState(
                "updated entry not found in read-back",
            ))?;
        self.refresh()?;
        info!("event=journal_update module=journal status=ok id={}", entry.id);
        Ok(updated)
    }

    pub fn delete_entry(&self, id: EntryId) -> JournalServiceResult<()> {
        self.repo.delete_entry(id)?;
        self.refresh()?;
        info!("event=journal_delete module=journal status=ok id={id}");
        Ok(())
    }

    /// Removes every entry and returns how many were deleted.
    pub fn delete_all(&self) -> JournalServiceResult<usize> {
        let removed = self.repo.delete_all_entries()?;
        self.refresh()?;
        info!("event=journal_delete_all module=journal status=ok removed={removed}");
        Ok(removed)
    }

    pub fn get_entry(&self, id: EntryId) -> JournalServiceResult<Option<JournalEntry>> {
        Ok(self.repo.get_entry(id)?)
    }

    /// Reloads the live list from storage and publishes it.
    pub fn refresh(&self) -> JournalServiceResult<Vec<JournalEntry>> {
        let entries = self.repo.list_entries()?;
        self.entries.set(entries.clone());
        Ok(entries)
    }
}

/// Reflection prompts shown on the journal editor.
pub fn gratitude_prompts() -> &'static [&'static str] {
    &GRATITUDE_PROMPTS
}

/// Collapses whitespace and keeps the first 100 characters for list rows.
pub fn derive_preview(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    normalized.trim().chars().take(PREVIEW_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::{derive_preview, gratitude_prompts};

    #[test]
    fn preview_collapses_whitespace_and_limits_length() {
        assert_eq!(derive_preview("  a\n\n b\tc  "), "a b c");
        let long = "x".repeat(250);
        assert_eq!(derive_preview(&long).chars().count(), 100);
    }

    #[test]
    fn five_prompts_are_available() {
        assert_eq!(gratitude_prompts().len(), 5);
    }
}
