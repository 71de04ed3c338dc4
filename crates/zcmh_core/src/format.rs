//! Display formatting for dates, clock times and playback positions.
//!
//! Date and clock helpers take the target time zone explicitly so hosts pass
//! `chrono::Local` and tests pass `chrono::Utc`.

use chrono::{Datelike, TimeZone};
use std::fmt::Display;

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Formats epoch milliseconds as `dd MMMM yyyy` with Indonesian month names.
///
/// Returns `None` when `epoch_ms` is outside chrono's representable range.
pub fn format_display_date<Tz: TimeZone>(epoch_ms: i64, tz: &Tz) -> Option<String> {
    let local = tz.timestamp_millis_opt(epoch_ms).single()?;
    let month = MONTHS_ID.get(local.month0() as usize)?;
    Some(format!("{:02} {} {}", local.day(), month, local.year()))
}

/// Formats epoch milliseconds as a 24h `HH:mm` clock label.
pub fn format_clock_time<Tz>(epoch_ms: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = tz.timestamp_millis_opt(epoch_ms).single()?;
    Some(local.format("%H:%M").to_string())
}

/// Formats a playback position as `m:ss`, or `h:mm:ss` from one hour on.
pub fn format_playback_time(millis: u64) -> String {
    let total_seconds = millis / 1000;
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3600;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
