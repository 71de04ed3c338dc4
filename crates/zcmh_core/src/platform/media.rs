//! Media decode/playback contract.

use super::HostResult;
use crate::model::music::AudioResource;

/// Host audio decoder that turns a bundled resource into a session.
pub trait MediaEngine: Send + Sync {
    fn load(&self, resource: AudioResource) -> HostResult<Box<dyn MediaSession>>;
}

/// One loaded, seekable audio track.
///
/// Releasing an already released session must be a no-op.
pub trait MediaSession: Send {
    fn start(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Seeks within the track. The decoder clamps to `[0, duration]`.
    fn seek_to(&mut self, position_ms: u64);
    fn position_ms(&self) -> u64;
    /// `None` until decode metadata is available.
    fn duration_ms(&self) -> Option<u64>;
    fn set_looping(&mut self, looping: bool);
    fn release(&mut self);
}
