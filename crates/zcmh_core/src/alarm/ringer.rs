//! Alarm tone lifetime: at most one ring, capped at a fixed duration.

use crate::platform::{AlarmDevice, Clock, ToneSource};
use log::{error, info, warn};
use std::sync::Arc;

/// Maximum ring duration before the tone is stopped automatically.
pub const TONE_MAX_DURATION_MS: i64 = 60_000;

pub struct AlarmRinger {
    device: Arc<dyn AlarmDevice>,
    clock: Arc<dyn Clock>,
    active_source: Option<ToneSource>,
    auto_stop_at: Option<i64>,
}

impl AlarmRinger {
    pub fn new(device: Arc<dyn AlarmDevice>, clock: Arc<dyn Clock>) -> Self {
        Self {
            device,
            clock,
            active_source: None,
            auto_stop_at: None,
        }
    }

    /// Starts the alarm tone, replacing any ring in progress.
    ///
    /// Falls back to the notification sound when the alarm tone is
    /// unavailable. Returns the source that is ringing, if any.
    pub fn ring(&mut self) -> Option<ToneSource> {
        self.stop();

        let source = match self.device.play_tone(ToneSource::Alarm) {
            Ok(()) => ToneSource::Alarm,
            Err(err) => {
                warn!("event=alarm_tone module=alarm status=fallback error={err}");
                match self.device.play_tone(ToneSource::Notification) {
                    Ok(()) => ToneSource::Notification,
                    Err(err) => {
                        error!("event=alarm_tone module=alarm status=error error={err}");
                        return None;
                    }
                }
            }
        };

        self.active_source = Some(source);
        self.auto_stop_at = Some(self.clock.now_ms() + TONE_MAX_DURATION_MS);
        info!("event=alarm_tone module=alarm status=ringing source={source:?}");
        Some(source)
    }

    /// Stops the tone. Safe to call when nothing is ringing.
    pub fn stop(&mut self) {
        if let Err(err) = self.device.stop_tone() {
            error!("event=alarm_tone_stop module=alarm status=error error={err}");
        }
        if self.active_source.take().is_some() {
            info!("event=alarm_tone_stop module=alarm status=ok");
        }
        self.auto_stop_at = None;
    }

    /// Stops the tone once the duration cap is reached.
    ///
    /// Returns `true` when this call stopped the ring.
    pub fn tick(&mut self) -> bool {
        match self.auto_stop_at {
            Some(deadline) if self.clock.now_ms() >= deadline => {
                self.stop();
                true
            }
            _ => false,
        }
    }

    pub fn is_ringing(&self) -> bool {
        self.active_source.is_some()
    }

    pub fn active_source(&self) -> Option<ToneSource> {
        self.active_source
    }
}

impl Drop for AlarmRinger {
    fn drop(&mut self) {
        if self.is_ringing() {
            self.stop();
        }
    }
}
