//! Alarm-side device services: tone, vibration, wake lock, notifications.

use super::HostResult;
use std::time::Duration;

/// Sound source for the alarm ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneSource {
    /// Default alarm tone.
    Alarm,
    /// Default notification sound, used when no alarm tone is available.
    Notification,
}

/// Action button attached to the meal notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub label: String,
    /// Identifier delivered back to the receiver when tapped.
    pub action_id: &'static str,
}

/// High-priority meal reminder notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmNotification {
    pub id: u32,
    pub channel_id: &'static str,
    pub title: String,
    pub body: String,
    pub expanded_body: String,
    pub actions: Vec<NotificationAction>,
}

pub trait AlarmDevice: Send + Sync {
    /// Wakes the screen; the host releases the lock after `duration`.
    fn acquire_wake_lock(&self, duration: Duration) -> HostResult<()>;
    fn play_tone(&self, source: ToneSource) -> HostResult<()>;
    fn stop_tone(&self) -> HostResult<()>;
    /// Alternating off/on milliseconds, played once.
    fn vibrate(&self, pattern_ms: &[u64]) -> HostResult<()>;
    fn post_notification(&self, notification: &AlarmNotification) -> HostResult<()>;
}
