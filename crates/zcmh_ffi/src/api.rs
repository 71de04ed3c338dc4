//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose journal, music catalog, consultation and alarm use-cases to Dart
//!   via FRB.
//! - Translate core errors into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Alarm scheduling requests are queued in core; Dart drains and executes
//!   them against the platform scheduler.

use chrono::Local;
use log::warn;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use zcmh_core::alarm::AlarmController;
use zcmh_core::config::AppConfig;
use zcmh_core::db::open_db;
use zcmh_core::format::format_playback_time as format_playback_time_inner;
use zcmh_core::model::music::{builtin_catalog, filter_tracks, MusicCategory, MusicTrack};
use zcmh_core::platform::{HostRequest, OutboxScheduler, SystemClock};
use zcmh_core::service::journal_service::{derive_preview, gratitude_prompts};
use zcmh_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    whatsapp_url, ConsultationTopic, EntryId, JournalEntry, JournalService, JournalServiceError,
    SqliteJournalRepository,
};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static ALARM: OnceLock<AlarmRuntime> = OnceLock::new();

struct AlarmRuntime {
    outbox: Arc<OutboxScheduler>,
    controller: AlarmController,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); blank
///   falls back to the configured level (`ZCMH_LOG_LEVEL` or build default).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`; reconfiguration is an error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = effective_log_level(&level, app_config());
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Journal row for list and detail screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntryItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Display date, e.g. `31 Oktober 2025`.
    pub date: String,
    pub timestamp: i64,
    /// Whitespace-collapsed content, at most 100 characters.
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalListResponse {
    /// Entries, most recent first.
    pub items: Vec<JournalEntryItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalActionResponse {
    pub ok: bool,
    pub entry_id: Option<i64>,
    pub message: String,
}

impl JournalActionResponse {
    fn success(message: impl Into<String>, entry_id: Option<EntryId>) -> Self {
        Self {
            ok: true,
            entry_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }
}

/// Lists every journal entry.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; on failure returns an empty list with the error message.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_list() -> JournalListResponse {
    match with_journal_service(|service| Ok(service.entries().get())) {
        Ok(entries) => {
            let items = entries.into_iter().map(to_entry_item).collect::<Vec<_>>();
            let message = format!("Found {} entr(ies).", items.len());
            JournalListResponse { items, message }
        }
        Err(err) => JournalListResponse {
            items: Vec::new(),
            message: format!("journal_list failed: {err}"),
        },
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn journal_get(id: i64) -> Option<JournalEntryItem> {
    with_journal_service(|service| service.get_entry(id))
        .ok()
        .flatten()
        .map(to_entry_item)
}

/// Saves a new entry stamped with the current device date.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_create(title: String, content: String) -> JournalActionResponse {
    match with_journal_service(|service| service.create_entry(title.trim(), content.trim())) {
        Ok(entry) => JournalActionResponse::success("Entry saved.", Some(entry.id)),
        Err(err) => failure("journal_create", err),
    }
}

/// Replaces title and content of an existing entry, keeping its date.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_update(id: i64, title: String, content: String) -> JournalActionResponse {
    let result = with_journal_service(|service| {
        let mut entry = service
            .get_entry(id)?
            .ok_or(JournalServiceError::EntryNotFound(id))?;
        entry.title = title.trim().to_string();
        entry.content = content.trim().to_string();
        service.update_entry(&entry)
    });
    match result {
        Ok(entry) => JournalActionResponse::success("Entry updated.", Some(entry.id)),
        Err(err) => failure("journal_update", err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn journal_delete(id: i64) -> JournalActionResponse {
    match with_journal_service(|service| service.delete_entry(id)) {
        Ok(()) => JournalActionResponse::success("Entry deleted.", Some(id)),
        Err(err) => failure("journal_delete", err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn journal_delete_all() -> JournalActionResponse {
    match with_journal_service(|service| service.delete_all()) {
        Ok(removed) => JournalActionResponse::success(format!("Deleted {removed} entr(ies)."), None),
        Err(err) => failure("journal_delete_all", err),
    }
}

/// The fixed gratitude prompts shown in the editor.
#[flutter_rust_bridge::frb(sync)]
pub fn journal_prompts() -> Vec<String> {
    gratitude_prompts()
        .iter()
        .map(|prompt| (*prompt).to_string())
        .collect()
}

/// Catalog row for the music screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicTrackItem {
    pub id: u32,
    /// `relax|sleep|focus`.
    pub category: String,
    pub category_label: String,
    pub frequency_band: String,
    pub title: String,
    pub description: String,
    /// Bundled asset name for the platform decoder.
    pub resource: String,
}

/// Lists the built-in tracks, optionally filtered by category.
///
/// Unknown category strings yield the full catalog.
#[flutter_rust_bridge::frb(sync)]
pub fn music_catalog(category: Option<String>) -> Vec<MusicTrackItem> {
    let category = category.as_deref().and_then(MusicCategory::parse);
    filter_tracks(&builtin_catalog(), category)
        .into_iter()
        .map(to_track_item)
        .collect()
}

/// Formats a playback position as `m:ss` or `h:mm:ss`.
#[flutter_rust_bridge::frb(sync)]
pub fn format_playback_time(position_ms: u64) -> String {
    format_playback_time_inner(position_ms)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsultationUrlResponse {
    pub ok: bool,
    pub url: Option<String>,
    pub message: String,
}

/// Builds the WhatsApp link for `topic` (`psychologist|hypnotherapist|general`).
///
/// Dart opens the returned URL and falls back to the browser itself.
#[flutter_rust_bridge::frb(sync)]
pub fn consultation_url(topic: String) -> ConsultationUrlResponse {
    let Some(topic) = ConsultationTopic::parse(&topic) else {
        return ConsultationUrlResponse {
            ok: false,
            url: None,
            message: format!("unknown consultation topic `{}`", topic.trim()),
        };
    };
    match whatsapp_url(&app_config().consult_phone, topic.default_message()) {
        Ok(url) => ConsultationUrlResponse {
            ok: true,
            url: Some(url),
            message: "Link ready.".to_string(),
        },
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error fn=consultation_url error={err}");
            ConsultationUrlResponse {
                ok: false,
                url: None,
                message: format!("consultation_url failed: {err}"),
            }
        }
    }
}

/// Alarm screen snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmStatusResponse {
    pub ok: bool,
    pub is_enabled: bool,
    pub interval_hours: u32,
    /// Next fire times as `HH:mm` in device local time.
    pub upcoming: Vec<String>,
    pub upcoming_epoch_ms: Vec<i64>,
    /// Whether the "alarm enabled" confirmation should be shown.
    pub show_confirmation: bool,
    pub message: String,
}

/// One scheduler request for Dart to forward to the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRequestItem {
    /// `schedule_recurring|schedule_one_shot|cancel`.
    pub kind: String,
    pub name: String,
    pub interval_ms: Option<i64>,
    pub fire_at_ms: Option<i64>,
}

#[flutter_rust_bridge::frb(sync)]
pub fn alarm_status() -> AlarmStatusResponse {
    alarm_snapshot(true, "ok")
}

/// Enables the meal reminder when off, disables it when on.
#[flutter_rust_bridge::frb(sync)]
pub fn alarm_toggle() -> AlarmStatusResponse {
    match alarm_runtime().controller.toggle() {
        Ok(settings) => {
            let message = if settings.is_enabled {
                "Alarm enabled."
            } else {
                "Alarm disabled."
            };
            alarm_snapshot(true, message)
        }
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error fn=alarm_toggle error={err}");
            alarm_snapshot(false, &format!("alarm_toggle failed: {err}"))
        }
    }
}

/// Queues a one-shot reminder ten minutes from now.
#[flutter_rust_bridge::frb(sync)]
pub fn alarm_snooze() -> AlarmStatusResponse {
    match alarm_runtime().controller.snooze() {
        Ok(fire_at) => alarm_snapshot(true, &format!("Snoozed until {fire_at}.")),
        Err(err) => alarm_snapshot(false, &format!("alarm_snooze failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn alarm_dismiss_confirmation() -> AlarmStatusResponse {
    alarm_runtime().controller.dismiss_confirmation();
    alarm_snapshot(true, "ok")
}

/// Takes every scheduler request queued since the last call.
#[flutter_rust_bridge::frb(sync)]
pub fn alarm_drain_host_requests() -> Vec<HostRequestItem> {
    alarm_runtime()
        .outbox
        .drain()
        .into_iter()
        .map(to_host_request_item)
        .collect()
}

fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::from_env)
}

fn effective_log_level<'a>(requested: &'a str, config: &'a AppConfig) -> &'a str {
    if requested.trim().is_empty() {
        config.log_level.as_str()
    } else {
        requested
    }
}

fn resolve_db_path() -> PathBuf {
    app_config().db_path.clone()
}

fn alarm_runtime() -> &'static AlarmRuntime {
    ALARM.get_or_init(|| {
        let outbox = Arc::new(OutboxScheduler::new());
        let controller = AlarmController::new(outbox.clone(), Arc::new(SystemClock));
        AlarmRuntime { outbox, controller }
    })
}

fn alarm_snapshot(ok: bool, message: &str) -> AlarmStatusResponse {
    let controller = &alarm_runtime().controller;
    let settings = controller.settings().get();
    AlarmStatusResponse {
        ok,
        is_enabled: settings.is_enabled,
        interval_hours: settings.interval_hours,
        upcoming: controller.upcoming_labels(&Local),
        upcoming_epoch_ms: controller.upcoming().get(),
        show_confirmation: controller.show_confirmation().get(),
        message: message.to_string(),
    }
}

fn with_journal_service<T>(
    f: impl FnOnce(&JournalService<SqliteJournalRepository<'_>>) -> Result<T, JournalServiceError>,
) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("journal DB open failed: {err}"))?;
    let repo = SqliteJournalRepository::new(&conn);
    let service = JournalService::try_new(repo, Arc::new(SystemClock))
        .map_err(|err| format!("journal load failed: {err}"))?;
    f(&service).map_err(|err| err.to_string())
}

fn failure(call: &str, err: String) -> JournalActionResponse {
    warn!("event=ffi_call module=ffi status=error fn={call} error={err}");
    JournalActionResponse::failure(format!("{call} failed: {err}"))
}

fn to_entry_item(entry: JournalEntry) -> JournalEntryItem {
    JournalEntryItem {
        preview: derive_preview(&entry.content),
        id: entry.id,
        title: entry.title,
        content: entry.content,
        date: entry.date,
        timestamp: entry.timestamp,
    }
}

fn to_track_item(track: MusicTrack) -> MusicTrackItem {
    MusicTrackItem {
        id: track.id,
        category: track.category.as_str().to_string(),
        category_label: track.category.display_name().to_string(),
        frequency_band: track.category.frequency_band().to_string(),
        title: track.title.to_string(),
        description: track.description.to_string(),
        resource: track.resource.name().to_string(),
    }
}

fn to_host_request_item(request: HostRequest) -> HostRequestItem {
    match request {
        HostRequest::ScheduleRecurring {
            name,
            interval_ms,
            first_fire_at_ms,
        } => HostRequestItem {
            kind: "schedule_recurring".to_string(),
            name,
            interval_ms: Some(interval_ms),
            fire_at_ms: Some(first_fire_at_ms),
        },
        HostRequest::ScheduleOneShot { name, fire_at_ms } => HostRequestItem {
            kind: "schedule_one_shot".to_string(),
            name,
            interval_ms: None,
            fire_at_ms: Some(fire_at_ms),
        },
        HostRequest::Cancel { name } => HostRequestItem {
            kind: "cancel".to_string(),
            name,
            interval_ms: None,
            fire_at_ms: None,
        },
    }
}
