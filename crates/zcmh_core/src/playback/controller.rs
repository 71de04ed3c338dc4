//! Audio playback controller behind the music screen.
//!
//! A wall-clock state machine with no internal threads: the host calls
//! [`PlaybackController::tick`] on its own cadence and the controller decides
//! whether a position sample or the auto-stop timer is due.
//!
//! ```text
//! Idle -> Prepared -> Playing <-> Paused -> Stopped -> (released)
//! ```
//!
//! # Invariants
//! - At most one decode session exists; starting another track tears the
//!   previous one down first.
//! - Position is sampled every second while playing and never otherwise.
//! - With loop on, track completion never advances the index.
//! - Filtering never starts audible playback.
//! - `state.is_playing` mirrors the decoder after every operation.
//! - The media notification is posted after play, pause and resume and
//!   withdrawn on stop.

use super::notification::music_notification;
use super::player::MusicPlayer;
use super::relay::{MusicCommand, MusicCommandTarget};
use crate::model::music::{builtin_catalog, filter_tracks, MusicCategory, MusicTrack};
use crate::platform::{Clock, MediaEngine, MusicNotifier};
use crate::state::Observable;
use log::{debug, error, info, warn};
use serde::Serialize;
use std::sync::Arc;

pub const POSITION_POLL_INTERVAL_MS: i64 = 1000;

/// Runtime playback state published to the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackState {
    pub current_track_index: usize,
    pub is_playing: bool,
    pub is_looping: bool,
    pub position_ms: u64,
    pub duration_ms: u64,
    pub active_timer_minutes: Option<u32>,
    pub selected_category: Option<MusicCategory>,
}

pub struct PlaybackController {
    player: MusicPlayer,
    clock: Arc<dyn Clock>,
    catalog: Vec<MusicTrack>,
    tracks: Observable<Vec<MusicTrack>>,
    state: Observable<PlaybackState>,
    next_poll_at: Option<i64>,
    stop_deadline: Option<i64>,
    notifier: Option<Arc<dyn MusicNotifier>>,
}

impl PlaybackController {
    /// Creates a controller over the built-in catalog and prepares its first
    /// track for display.
    pub fn new(engine: Arc<dyn MediaEngine>, clock: Arc<dyn Clock>) -> Self {
        Self::with_catalog(engine, clock, builtin_catalog())
    }

    pub fn with_catalog(
        engine: Arc<dyn MediaEngine>,
        clock: Arc<dyn Clock>,
        catalog: Vec<MusicTrack>,
    ) -> Self {
        let mut controller = Self {
            player: MusicPlayer::new(engine),
            clock,
            tracks: Observable::new(catalog.clone()),
            catalog,
            state: Observable::new(PlaybackState::default()),
            next_poll_at: None,
            stop_deadline: None,
            notifier: None,
        };
        controller.prepare(0);
        controller
    }

    /// Attaches the host notification surface for transport controls.
    pub fn with_notifier(mut self, notifier: Arc<dyn MusicNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn state(&self) -> &Observable<PlaybackState> {
        &self.state
    }

    /// Visible track list after the category filter.
    pub fn tracks(&self) -> &Observable<Vec<MusicTrack>> {
        &self.tracks
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.track_at(self.state.get().current_track_index)
    }

    /// Loads the visible track at `index` without audible output.
    ///
    /// Preparing a different track while one plays tears the running session
    /// down, so playback ends up stopped on the newly prepared track.
    pub fn prepare(&mut self, index: usize) -> bool {
        let Some(track) = self.track_at(index) else {
            return false;
        };
        let was_playing = self.player.is_playing();
        let prepared = self.player.prepare(track.resource);
        let playing = self.player.is_playing();
        if !playing {
            self.next_poll_at = None;
        }
        let duration_ms = self.player.duration_ms();
        let position_ms = self.player.position_ms();
        self.state.update(|state| {
            state.current_track_index = index;
            state.is_playing = playing;
            state.duration_ms = duration_ms;
            state.position_ms = position_ms;
        });
        if was_playing && !playing {
            info!(
                "event=track_prepare module=playback status=interrupted track_id={}",
                track.id
            );
            self.show_notification();
        }
        prepared
    }

    /// Plays the visible track at `index`, resuming it when already loaded.
    ///
    /// Returns `false` when the index is out of range or the track failed to
    /// load; the controller is then stopped.
    pub fn play(&mut self, index: usize) -> bool {
        let Some(track) = self.track_at(index) else {
            warn!("event=track_play module=playback status=skipped reason=index_out_of_range index={index}");
            return false;
        };

        let playing = self.player.play(track.resource);
        self.next_poll_at = playing.then(|| self.clock.now_ms());
        let duration_ms = self.player.duration_ms();
        let position_ms = self.player.position_ms();
        self.state.update(|state| {
            state.current_track_index = index;
            state.is_playing = playing;
            state.duration_ms = duration_ms;
            state.position_ms = position_ms;
        });
        info!(
            "event=track_play module=playback status={} track_id={} index={}",
            if playing { "ok" } else { "error" },
            track.id,
            index
        );
        if playing {
            self.show_notification();
        } else {
            self.hide_notification();
        }
        playing
    }

    pub fn pause(&mut self) {
        self.player.pause();
        self.next_poll_at = None;
        let position_ms = self.player.position_ms();
        self.state.update(|state| {
            state.is_playing = false;
            state.position_ms = position_ms;
        });
        self.show_notification();
    }

    /// Resumes the loaded track, or plays the current index after a stop.
    pub fn resume(&mut self) {
        if !self.player.has_session() {
            let index = self.state.get().current_track_index;
            self.play(index);
            return;
        }
        self.player.resume();
        let playing = self.player.is_playing();
        self.next_poll_at = playing.then(|| self.clock.now_ms());
        self.state.update(|state| state.is_playing = playing);
        self.show_notification();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.player.is_playing() {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Halts playback, releases the session and cancels the auto-stop timer.
    pub fn stop(&mut self) {
        self.player.stop();
        self.next_poll_at = None;
        self.stop_deadline = None;
        self.state.update(|state| {
            state.is_playing = false;
            state.position_ms = 0;
            state.active_timer_minutes = None;
        });
        self.hide_notification();
        info!("event=track_stop module=playback status=ok");
    }

    pub fn seek_to(&mut self, position_ms: u64) {
        self.player.seek_to(position_ms);
        let duration_ms = self.player.duration_ms();
        let clamped = if duration_ms > 0 {
            position_ms.min(duration_ms)
        } else {
            position_ms
        };
        self.state.update(|state| state.position_ms = clamped);
    }

    /// Plays the next visible track, wrapping to the first.
    pub fn next(&mut self) {
        let len = self.tracks.get().len();
        if len == 0 {
            return;
        }
        let index = (self.state.get().current_track_index + 1) % len;
        self.play(index);
    }

    /// Plays the previous visible track, wrapping to the last.
    pub fn previous(&mut self) {
        let len = self.tracks.get().len();
        if len == 0 {
            return;
        }
        let current = self.state.get().current_track_index;
        let index = if current > 0 && current < len {
            current - 1
        } else {
            len - 1
        };
        self.play(index);
    }

    pub fn toggle_loop(&mut self) {
        let looping = self.player.toggle_loop();
        self.state.update(|state| state.is_looping = looping);
    }

    /// Replaces the visible list with tracks of `category` (all for `None`).
    ///
    /// When idle, the first visible track is prepared. When a track is
    /// playing it keeps playing; the index follows it if it is still
    /// visible and resets to the first track otherwise.
    pub fn filter_by_category(&mut self, category: Option<MusicCategory>) {
        let visible = filter_tracks(&self.catalog, category);
        let playing_resource = self
            .player
            .is_playing()
            .then(|| self.player.current_resource())
            .flatten();
        let index = playing_resource
            .and_then(|resource| visible.iter().position(|track| track.resource == resource))
            .unwrap_or(0);
        let has_tracks = !visible.is_empty();

        self.tracks.set(visible);
        self.state.update(|state| {
            state.selected_category = category;
            state.current_track_index = index;
        });

        if playing_resource.is_none() && has_tracks {
            self.prepare(0);
        }
        debug!(
            "event=track_filter module=playback status=ok category={}",
            category.map_or("all", MusicCategory::as_str)
        );
    }

    /// Completion callback from the decoder.
    pub fn on_track_completed(&mut self) {
        if self.player.is_looping() {
            debug!("event=track_complete module=playback status=looping");
            return;
        }
        self.next();
    }

    /// Schedules an automatic stop after `minutes`, replacing any timer.
    pub fn set_timer(&mut self, minutes: u32) {
        self.cancel_timer();
        if minutes == 0 {
            return;
        }
        self.stop_deadline = Some(self.clock.now_ms() + i64::from(minutes) * 60 * 1000);
        self.state
            .update(|state| state.active_timer_minutes = Some(minutes));
        info!("event=sleep_timer module=playback status=armed minutes={minutes}");
    }

    pub fn cancel_timer(&mut self) {
        self.stop_deadline = None;
        if self.state.get().active_timer_minutes.is_some() {
            self.state.update(|state| state.active_timer_minutes = None);
        }
    }

    /// Runs due deadlines: the auto-stop timer first, then position sampling.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();

        if self.stop_deadline.is_some_and(|deadline| now >= deadline) {
            info!("event=sleep_timer module=playback status=fired");
            self.stop();
        }

        if !self.player.is_playing() {
            self.next_poll_at = None;
            return;
        }
        if self.next_poll_at.is_some_and(|due| now >= due) {
            let position_ms = self.player.position_ms();
            let duration_ms = self.player.duration_ms();
            self.state.update(|state| {
                state.position_ms = position_ms;
                state.duration_ms = duration_ms;
            });
            self.next_poll_at = Some(now + POSITION_POLL_INTERVAL_MS);
        }
    }

    /// Whether a position sample is scheduled.
    pub fn is_polling(&self) -> bool {
        self.next_poll_at.is_some()
    }

    /// Releases the session and cancels poll and timer.
    pub fn shutdown(&mut self) {
        self.player.release();
        self.next_poll_at = None;
        self.stop_deadline = None;
        self.state.update(|state| {
            state.is_playing = false;
            state.position_ms = 0;
            state.active_timer_minutes = None;
        });
        self.hide_notification();
        info!("event=playback_shutdown module=playback status=ok");
    }

    fn track_at(&self, index: usize) -> Option<MusicTrack> {
        self.tracks.get().get(index).cloned()
    }

    fn show_notification(&self) {
        let Some(notifier) = self.notifier.as_ref() else {
            return;
        };
        let track = self.current_track();
        let notification = music_notification(self.player.is_playing(), track.as_ref());
        if let Err(err) = notifier.show(&notification) {
            error!("event=music_notify module=playback status=error error={err}");
        }
    }

    fn hide_notification(&self) {
        let Some(notifier) = self.notifier.as_ref() else {
            return;
        };
        if let Err(err) = notifier.hide() {
            error!("event=music_notify_hide module=playback status=error error={err}");
        }
    }
}

impl MusicCommandTarget for PlaybackController {
    fn handle_command(&mut self, command: MusicCommand) {
        match command {
            MusicCommand::Play => self.resume(),
            MusicCommand::Pause => self.pause(),
            MusicCommand::Next => self.next(),
            MusicCommand::Previous => self.previous(),
            MusicCommand::Stop => self.stop(),
        }
    }
}
