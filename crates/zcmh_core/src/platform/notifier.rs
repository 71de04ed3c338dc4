//! Ongoing media notification shown while the music player is active.

use super::device::NotificationAction;
use super::HostResult;

/// Low-priority media notification with transport controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicNotification {
    pub id: u32,
    pub channel_id: &'static str,
    pub title: String,
    pub body: String,
    /// Non-dismissable while audio is running.
    pub ongoing: bool,
    /// Compact-view buttons in display order.
    pub actions: Vec<NotificationAction>,
    /// Action delivered when the user swipes the notification away.
    pub delete_action_id: &'static str,
}

pub trait MusicNotifier: Send + Sync {
    /// Posts or replaces the music notification.
    fn show(&self, notification: &MusicNotification) -> HostResult<()>;
    fn hide(&self) -> HostResult<()>;
}
