//! Single decode session owner.
//!
//! # Invariants
//! - At most one [`MediaSession`] is alive; a new load releases the old one
//!   before the engine is asked for another.
//! - Load failures leave the player with no session and `is_playing=false`.
//! - `release()` is idempotent.

use crate::model::music::AudioResource;
use crate::platform::{MediaEngine, MediaSession};
use log::{error, info};
use std::sync::Arc;

pub struct MusicPlayer {
    engine: Arc<dyn MediaEngine>,
    session: Option<Box<dyn MediaSession>>,
    current_resource: Option<AudioResource>,
    is_playing: bool,
    is_looping: bool,
}

impl MusicPlayer {
    pub fn new(engine: Arc<dyn MediaEngine>) -> Self {
        Self {
            engine,
            session: None,
            current_resource: None,
            is_playing: false,
            is_looping: false,
        }
    }

    /// Loads `resource` without starting it. No-op when already loaded.
    ///
    /// Returns `true` when a session for `resource` is available.
    pub fn prepare(&mut self, resource: AudioResource) -> bool {
        if self.is_loaded(resource) {
            return true;
        }
        self.load(resource)
    }

    /// Starts `resource`, resuming when it is already the loaded track.
    ///
    /// Returns `true` when playback is running afterwards.
    pub fn play(&mut self, resource: AudioResource) -> bool {
        if self.is_loaded(resource) {
            if !self.is_playing {
                self.resume();
            }
            return self.is_playing;
        }

        if !self.load(resource) {
            return false;
        }
        self.resume();
        self.is_playing
    }

    pub fn pause(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.pause();
        }
        self.is_playing = false;
    }

    pub fn resume(&mut self) {
        match self.session.as_mut() {
            Some(session) => {
                session.start();
                self.is_playing = true;
            }
            None => self.is_playing = false,
        }
    }

    /// Halts playback and releases the session.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.stop();
        }
        self.is_playing = false;
        self.release();
    }

    pub fn seek_to(&mut self, position_ms: u64) {
        if let Some(session) = self.session.as_mut() {
            session.seek_to(position_ms);
        }
    }

    pub fn position_ms(&self) -> u64 {
        self.session.as_ref().map_or(0, |session| session.position_ms())
    }

    pub fn duration_ms(&self) -> u64 {
        self.session
            .as_ref()
            .and_then(|session| session.duration_ms())
            .unwrap_or(0)
    }

    /// Flips the loop flag and applies it to the live session.
    pub fn toggle_loop(&mut self) -> bool {
        self.is_looping = !self.is_looping;
        if let Some(session) = self.session.as_mut() {
            session.set_looping(self.is_looping);
        }
        self.is_looping
    }

    pub fn release(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.release();
        }
        self.current_resource = None;
        self.is_playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn current_resource(&self) -> Option<AudioResource> {
        self.current_resource
    }

    fn is_loaded(&self, resource: AudioResource) -> bool {
        self.session.is_some() && self.current_resource == Some(resource)
    }

    fn load(&mut self, resource: AudioResource) -> bool {
        self.release();

        match self.engine.load(resource) {
            Ok(mut session) => {
                session.set_looping(self.is_looping);
                self.session = Some(session);
                self.current_resource = Some(resource);
                info!(
                    "event=track_load module=playback status=ok resource={}",
                    resource.name()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=track_load module=playback status=error resource={} error={}",
                    resource.name(),
                    err
                );
                false
            }
        }
    }
}

impl Drop for MusicPlayer {
    fn drop(&mut self) {
        self.release();
    }
}
