//! Receiver bridge for scheduler fires and alarm notification taps.
//!
//! # Responsibility
//! - Map an opaque action identifier to an [`AlarmSignal`].
//! - Ring, vibrate and notify on a bare fire; stop or snooze on taps.
//!
//! # Invariants
//! - Signals may arrive while no UI state exists; nothing here reads it.
//! - Host failures are logged and swallowed.

use super::ringer::AlarmRinger;
use super::scheduler::AlarmScheduler;
use super::{ACTION_DISMISS, ACTION_SNOOZE};
use crate::platform::{
    AlarmDevice, AlarmNotification, Clock, JobScheduler, NotificationAction,
};
use log::{error, info};
use std::sync::Arc;
use std::time::Duration;

pub const WAKE_LOCK_DURATION: Duration = Duration::from_secs(10);
/// Off/on pattern in milliseconds, played once.
pub const VIBRATION_PATTERN_MS: [u64; 6] = [0, 1000, 500, 1000, 500, 1000];
pub const MEAL_NOTIFICATION_ID: u32 = 1001;
pub const MEAL_CHANNEL_ID: &str = "meal_alarm_channel";

const MEAL_TITLE: &str = "⏰ Waktunya Makan!";
const MEAL_BODY: &str =
    "Sudah 4 jam sejak makan terakhir. Yuk makan untuk jaga kesehatan mental!";
const MEAL_BODY_EXTRA: &str =
    "Makan teratur membantu mengurangi anxiety dan menjaga mood tetap stabil.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmSignal {
    /// The recurring job or the snooze trigger fired.
    Fire,
    /// "Already ate" was tapped.
    Dismiss,
    /// "Snooze 10 minutes" was tapped.
    Snooze,
}

impl AlarmSignal {
    /// Any identifier other than the two notification actions is a fire.
    pub fn from_action(action: Option<&str>) -> Self {
        match action {
            Some(ACTION_DISMISS) => Self::Dismiss,
            Some(ACTION_SNOOZE) => Self::Snooze,
            _ => Self::Fire,
        }
    }
}

pub struct AlarmReceiver {
    device: Arc<dyn AlarmDevice>,
    scheduler: AlarmScheduler,
    ringer: AlarmRinger,
}

impl AlarmReceiver {
    pub fn new(
        device: Arc<dyn AlarmDevice>,
        scheduler: Arc<dyn JobScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            ringer: AlarmRinger::new(Arc::clone(&device), Arc::clone(&clock)),
            scheduler: AlarmScheduler::new(scheduler, clock),
            device,
        }
    }

    /// Parses `action` and handles the resulting signal.
    pub fn handle_action(&mut self, action: Option<&str>) -> AlarmSignal {
        let signal = AlarmSignal::from_action(action);
        self.on_receive(signal);
        signal
    }

    pub fn on_receive(&mut self, signal: AlarmSignal) {
        info!("event=alarm_receive module=alarm status=start signal={signal:?}");
        match signal {
            AlarmSignal::Fire => self.fire(),
            AlarmSignal::Dismiss => self.ringer.stop(),
            AlarmSignal::Snooze => {
                self.ringer.stop();
                if let Err(err) = self.scheduler.schedule_snooze() {
                    error!("event=alarm_snooze module=alarm status=error error={err}");
                }
            }
        }
    }

    /// Drives the tone duration cap.
    pub fn tick(&mut self) -> bool {
        self.ringer.tick()
    }

    pub fn ringer(&self) -> &AlarmRinger {
        &self.ringer
    }

    fn fire(&mut self) {
        if let Err(err) = self.device.acquire_wake_lock(WAKE_LOCK_DURATION) {
            error!("event=alarm_wake module=alarm status=error error={err}");
        }

        self.ringer.ring();

        if let Err(err) = self.device.vibrate(&VIBRATION_PATTERN_MS) {
            error!("event=alarm_vibrate module=alarm status=error error={err}");
        }

        if let Err(err) = self.device.post_notification(&meal_notification()) {
            error!("event=alarm_notify module=alarm status=error error={err}");
        }
    }
}

/// Builds the meal reminder notification with its two actions.
pub fn meal_notification() -> AlarmNotification {
    AlarmNotification {
        id: MEAL_NOTIFICATION_ID,
        channel_id: MEAL_CHANNEL_ID,
        title: MEAL_TITLE.to_string(),
        body: MEAL_BODY.to_string(),
        expanded_body: format!("{MEAL_BODY}\n\n{MEAL_BODY_EXTRA}"),
        actions: vec![
            NotificationAction {
                label: "Sudah Makan".to_string(),
                action_id: ACTION_DISMISS,
            },
            NotificationAction {
                label: "Tunda 10 Menit".to_string(),
                action_id: ACTION_SNOOZE,
            },
        ],
    }
}
