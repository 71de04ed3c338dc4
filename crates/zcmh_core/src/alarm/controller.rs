//! Alarm scheduling controller behind the alarm screen.
//!
//! # Invariants
//! - `toggle()` is the only UI entry point for enabling and disabling.
//! - While enabled, exactly one recurring registration exists and the
//!   preview holds the next five fire times at the fixed interval.
//! - While disabled, the preview is empty.

use super::scheduler::{AlarmScheduler, MEAL_INTERVAL_MS};
use super::AlarmResult;
use crate::format::format_clock_time;
use crate::model::alarm::AlarmSettings;
use crate::platform::{Clock, JobScheduler};
use crate::state::Observable;
use chrono::TimeZone;
use log::{error, info};
use std::fmt::Display;
use std::sync::Arc;

/// Number of upcoming fire times shown in the preview.
pub const PREVIEW_COUNT: usize = 5;

pub struct AlarmController {
    scheduler: AlarmScheduler,
    clock: Arc<dyn Clock>,
    settings: Observable<AlarmSettings>,
    upcoming: Observable<Vec<i64>>,
    show_confirmation: Observable<bool>,
}

impl AlarmController {
    pub fn new(scheduler: Arc<dyn JobScheduler>, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_ms();
        Self {
            scheduler: AlarmScheduler::new(scheduler, Arc::clone(&clock)),
            clock,
            settings: Observable::new(AlarmSettings::disabled(now)),
            upcoming: Observable::new(Vec::new()),
            show_confirmation: Observable::new(false),
        }
    }

    pub fn settings(&self) -> &Observable<AlarmSettings> {
        &self.settings
    }

    /// Upcoming fire times in epoch milliseconds, earliest first.
    pub fn upcoming(&self) -> &Observable<Vec<i64>> {
        &self.upcoming
    }

    pub fn show_confirmation(&self) -> &Observable<bool> {
        &self.show_confirmation
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.get().is_enabled
    }

    /// Disables when enabled, enables otherwise.
    pub fn toggle(&self) -> AlarmResult<AlarmSettings> {
        if self.is_enabled() {
            self.disable()?;
        } else {
            self.enable()?;
        }
        Ok(self.settings.get())
    }

    /// Registers the recurring reminder starting one interval from now.
    ///
    /// Enabling while enabled behaves as disable-then-enable.
    pub fn enable(&self) -> AlarmResult<()> {
        if self.is_enabled() {
            self.disable()?;
        }

        let first_fire_at = self.clock.now_ms() + MEAL_INTERVAL_MS;
        let settings = AlarmSettings::enabled(first_fire_at);

        if let Err(err) = self.scheduler.schedule_meal_alarm(first_fire_at) {
            error!("event=alarm_enable module=alarm status=error error={err}");
            return Err(err.into());
        }

        self.settings.set(settings);
        self.upcoming.set(preview_fire_times(
            first_fire_at,
            settings.interval_ms(),
            PREVIEW_COUNT,
        ));
        self.show_confirmation.set(true);
        info!(
            "event=alarm_enable module=alarm status=ok first_fire_at_ms={} interval_hours={}",
            first_fire_at, settings.interval_hours
        );
        Ok(())
    }

    /// Cancels the recurring reminder and any pending snooze.
    ///
    /// Local state is reset even when the host cancellation fails.
    pub fn disable(&self) -> AlarmResult<()> {
        let result = self.scheduler.cancel_all();
        self.settings.set(AlarmSettings::disabled(self.clock.now_ms()));
        self.upcoming.set(Vec::new());
        match &result {
            Ok(()) => info!("event=alarm_disable module=alarm status=ok"),
            Err(err) => error!("event=alarm_disable module=alarm status=error error={err}"),
        }
        result.map_err(Into::into)
    }

    /// Schedules a one-shot reminder ten minutes out.
    pub fn snooze(&self) -> AlarmResult<i64> {
        Ok(self.scheduler.schedule_snooze()?)
    }

    pub fn dismiss_confirmation(&self) {
        self.show_confirmation.set(false);
    }

    /// Preview times as `HH:mm` labels in `tz`.
    pub fn upcoming_labels<Tz>(&self, tz: &Tz) -> Vec<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.upcoming
            .get()
            .into_iter()
            .filter_map(|at| format_clock_time(at, tz))
            .collect()
    }

    pub fn next_alarm_label<Tz>(&self, tz: &Tz) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.upcoming_labels(tz).into_iter().next()
    }
}

/// Returns `count` fire times starting at `first_fire_at`, `interval_ms` apart.
pub fn preview_fire_times(first_fire_at: i64, interval_ms: i64, count: usize) -> Vec<i64> {
    std::iter::successors(Some(first_fire_at), |at| Some(at + interval_ms))
        .take(count)
        .collect()
}
