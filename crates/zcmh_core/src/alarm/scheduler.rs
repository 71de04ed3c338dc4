//! Meal alarm registrations on the host's durable schedulers.

use crate::model::alarm::MEAL_INTERVAL_HOURS;
use crate::platform::{Clock, HostResult, JobScheduler};
use log::{info, warn};
use std::sync::Arc;

/// Logical name of the recurring meal reminder job.
pub const MEAL_ALARM_JOB: &str = "meal_alarm_work";
/// Logical name of the one-shot snooze trigger.
pub const SNOOZE_ALARM_JOB: &str = "meal_alarm_snooze";
pub const SNOOZE_DELAY_MS: i64 = 10 * 60 * 1000;
pub const MEAL_INTERVAL_MS: i64 = MEAL_INTERVAL_HOURS as i64 * 60 * 60 * 1000;

/// Thin adapter over [`JobScheduler`] shared by controller and receiver.
#[derive(Clone)]
pub struct AlarmScheduler {
    scheduler: Arc<dyn JobScheduler>,
    clock: Arc<dyn Clock>,
}

impl AlarmScheduler {
    pub fn new(scheduler: Arc<dyn JobScheduler>, clock: Arc<dyn Clock>) -> Self {
        Self { scheduler, clock }
    }

    /// Replaces any registration with a recurring job first firing at
    /// `first_fire_at_ms` (or now, when that is already in the past).
    pub fn schedule_meal_alarm(&self, first_fire_at_ms: i64) -> HostResult<()> {
        self.cancel_all()?;

        let now = self.clock.now_ms();
        let initial_delay_ms = (first_fire_at_ms - now).max(0);
        self.scheduler
            .schedule_recurring(MEAL_ALARM_JOB, MEAL_INTERVAL_MS, now + initial_delay_ms)?;

        info!(
            "event=alarm_schedule module=alarm status=ok job={} initial_delay_ms={} interval_ms={}",
            MEAL_ALARM_JOB, initial_delay_ms, MEAL_INTERVAL_MS
        );
        Ok(())
    }

    /// Schedules the one-shot snooze trigger and returns its fire time.
    ///
    /// A pending snooze is replaced, never stacked.
    pub fn schedule_snooze(&self) -> HostResult<i64> {
        let fire_at = self.clock.now_ms() + SNOOZE_DELAY_MS;
        self.scheduler.schedule_one_shot(SNOOZE_ALARM_JOB, fire_at)?;
        info!(
            "event=alarm_snooze module=alarm status=ok job={} fire_at_ms={}",
            SNOOZE_ALARM_JOB, fire_at
        );
        Ok(fire_at)
    }

    /// Cancels the recurring job and the snooze trigger.
    ///
    /// Both cancellations are attempted; the first failure is returned.
    pub fn cancel_all(&self) -> HostResult<()> {
        let recurring = self.scheduler.cancel(MEAL_ALARM_JOB);
        let snooze = self.scheduler.cancel(SNOOZE_ALARM_JOB);
        for (job, result) in [(MEAL_ALARM_JOB, &recurring), (SNOOZE_ALARM_JOB, &snooze)] {
            if let Err(err) = result {
                warn!("event=alarm_cancel module=alarm status=error job={job} error={err}");
            }
        }
        recurring.and(snooze)
    }
}
