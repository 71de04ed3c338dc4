//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the persisted journal record and its insert-time shape.
//! - Validate entries before they reach storage.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards.
//! - An entry must carry both a non-blank title and a non-blank content.
//! - `timestamp` is epoch milliseconds and never negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate key for journal entries.
pub type EntryId = i64;

/// Persisted journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub title: String,
    pub content: String,
    /// Display-formatted creation date, e.g. `31 Oktober 2025`.
    pub date: String,
    /// Unix epoch milliseconds. Drives list ordering.
    pub timestamp: i64,
}

/// Insert payload for a journal entry that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    pub date: String,
    pub timestamp: i64,
}

/// Validation failures for journal entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalValidationError {
    MissingTitle,
    MissingContent,
    NegativeTimestamp(i64),
}

impl Display for JournalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "journal entry needs a title"),
            Self::MissingContent => write!(f, "journal entry needs content"),
            Self::NegativeTimestamp(value) => {
                write!(f, "journal timestamp must be non-negative, got {value}")
            }
        }
    }
}

impl Error for JournalValidationError {}

impl NewJournalEntry {
    pub fn validate(&self) -> Result<(), JournalValidationError> {
        validate_fields(&self.title, &self.content, self.timestamp)
    }
}

impl JournalEntry {
    pub fn validate(&self) -> Result<(), JournalValidationError> {
        validate_fields(&self.title, &self.content, self.timestamp)
    }
}

fn validate_fields(title: &str, content: &str, timestamp: i64) -> Result<(), JournalValidationError> {
    if title.trim().is_empty() {
        return Err(JournalValidationError::MissingTitle);
    }
    if content.trim().is_empty() {
        return Err(JournalValidationError::MissingContent);
    }
    if timestamp < 0 {
        return Err(JournalValidationError::NegativeTimestamp(timestamp));
    }
    Ok(())
}
