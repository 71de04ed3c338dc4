//! Media notification content for the music player.

use super::relay::{ACTION_NEXT, ACTION_PAUSE, ACTION_PLAY, ACTION_PREVIOUS, ACTION_STOP};
use crate::model::music::MusicTrack;
use crate::platform::{MusicNotification, NotificationAction};

pub const MUSIC_NOTIFICATION_ID: u32 = 1002;
pub const MUSIC_CHANNEL_ID: &str = "music_player_channel";
pub const MUSIC_CHANNEL_NAME: &str = "Music Player";

const MUSIC_TITLE: &str = "Musik Anxiety Relief";
const MUSIC_BODY: &str = "Playing music therapy";

/// Builds the notification for the current playback state.
///
/// Actions are Previous, Play/Pause, Next; the middle one offers whatever
/// the user can do next, so it reads Pause while audio runs.
pub fn music_notification(is_playing: bool, track: Option<&MusicTrack>) -> MusicNotification {
    let (toggle_label, toggle_action) = if is_playing {
        ("Pause", ACTION_PAUSE)
    } else {
        ("Play", ACTION_PLAY)
    };
    let body = track.map_or_else(
        || MUSIC_BODY.to_string(),
        |track| format!("{MUSIC_BODY}: {}", track.title),
    );

    MusicNotification {
        id: MUSIC_NOTIFICATION_ID,
        channel_id: MUSIC_CHANNEL_ID,
        title: MUSIC_TITLE.to_string(),
        body,
        ongoing: is_playing,
        actions: vec![
            NotificationAction {
                label: "Previous".to_string(),
                action_id: ACTION_PREVIOUS,
            },
            NotificationAction {
                label: toggle_label.to_string(),
                action_id: toggle_action,
            },
            NotificationAction {
                label: "Next".to_string(),
                action_id: ACTION_NEXT,
            },
        ],
        delete_action_id: ACTION_STOP,
    }
}
