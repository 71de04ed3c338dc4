//! Relaxation-audio playback.
//!
//! # Responsibility
//! - Own the single decode session and the track catalog view.
//! - Post the media notification and route its actions to the live
//!   controller.
//!
//! # Invariants
//! - Track load failures never propagate; playback falls back to stopped.

pub mod controller;
pub mod notification;
pub mod player;
pub mod relay;

pub use controller::{PlaybackController, PlaybackState, POSITION_POLL_INTERVAL_MS};
pub use notification::{music_notification, MUSIC_CHANNEL_ID, MUSIC_NOTIFICATION_ID};
pub use player::MusicPlayer;
pub use relay::{
    DispatchOutcome, MusicCommand, MusicCommandRelay, MusicCommandTarget, RelayRegistration,
};
