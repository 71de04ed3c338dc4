//! Meal-reminder alarm settings.
//!
//! Held only in observable memory state. The host's recurring job is the
//! only durable trigger, so these settings reset on process restart.

use serde::{Deserialize, Serialize};

/// Fixed cadence of the meal reminder.
pub const MEAL_INTERVAL_HOURS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmSettings {
    pub is_enabled: bool,
    /// First fire time in epoch milliseconds.
    pub start_time: i64,
    pub interval_hours: u32,
}

impl AlarmSettings {
    /// Disabled settings stamped at `now_ms`.
    pub fn disabled(now_ms: i64) -> Self {
        Self {
            is_enabled: false,
            start_time: now_ms,
            interval_hours: MEAL_INTERVAL_HOURS,
        }
    }

    pub fn enabled(first_fire_at: i64) -> Self {
        Self {
            is_enabled: true,
            start_time: first_fire_at,
            interval_hours: MEAL_INTERVAL_HOURS,
        }
    }

    pub fn interval_ms(&self) -> i64 {
        i64::from(self.interval_hours) * 60 * 60 * 1000
    }
}
