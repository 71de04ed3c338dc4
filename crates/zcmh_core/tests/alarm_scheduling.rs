mod common;

use chrono::Utc;
use common::FailingScheduler;
use std::sync::Arc;
use zcmh_core::alarm::scheduler::{
    MEAL_ALARM_JOB, MEAL_INTERVAL_MS, SNOOZE_ALARM_JOB, SNOOZE_DELAY_MS,
};
use zcmh_core::alarm::AlarmController;
use zcmh_core::platform::{HostRequest, ManualClock, OutboxScheduler};

// 2025-10-31T10:05:00Z
const NOW_MS: i64 = 1_761_905_100_000;
const HOUR_MS: i64 = 60 * 60 * 1000;

fn controller() -> (AlarmController, Arc<OutboxScheduler>, Arc<ManualClock>) {
    let outbox = Arc::new(OutboxScheduler::new());
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let controller = AlarmController::new(outbox.clone(), clock.clone());
    (controller, outbox, clock)
}

#[test]
fn enabling_registers_one_recurring_job_and_five_previews() {
    let (controller, outbox, _clock) = controller();

    let settings = controller.toggle().unwrap();

    assert!(settings.is_enabled);
    assert_eq!(settings.interval_hours, 4);
    assert_eq!(
        outbox.registrations(),
        vec![HostRequest::ScheduleRecurring {
            name: MEAL_ALARM_JOB.to_string(),
            interval_ms: MEAL_INTERVAL_MS,
            first_fire_at_ms: NOW_MS + 4 * HOUR_MS,
        }]
    );

    let upcoming = controller.upcoming().get();
    assert_eq!(upcoming.len(), 5);
    assert_eq!(upcoming[0], NOW_MS + 4 * HOUR_MS);
    assert!(upcoming.windows(2).all(|pair| pair[1] - pair[0] == 4 * HOUR_MS));
    assert!(controller.show_confirmation().get());
}

#[test]
fn preview_labels_use_twenty_four_hour_clock() {
    let (controller, _outbox, _clock) = controller();
    controller.toggle().unwrap();

    assert_eq!(
        controller.upcoming_labels(&Utc),
        vec!["14:05", "18:05", "22:05", "02:05", "06:05"]
    );
    assert_eq!(controller.next_alarm_label(&Utc).as_deref(), Some("14:05"));
}

#[test]
fn toggling_twice_leaves_nothing_registered() {
    let (controller, outbox, _clock) = controller();

    controller.toggle().unwrap();
    let settings = controller.toggle().unwrap();

    assert!(!settings.is_enabled);
    assert!(outbox.registrations().is_empty());
    assert!(controller.upcoming().get().is_empty());
    assert!(controller.next_alarm_label(&Utc).is_none());
}

#[test]
fn re_enabling_replaces_rather_than_stacks() {
    let (controller, outbox, clock) = controller();

    controller.enable().unwrap();
    clock.advance_ms(HOUR_MS);
    controller.enable().unwrap();

    let registrations = outbox.registrations();
    assert_eq!(registrations.len(), 1);
    assert_eq!(
        registrations[0],
        HostRequest::ScheduleRecurring {
            name: MEAL_ALARM_JOB.to_string(),
            interval_ms: MEAL_INTERVAL_MS,
            first_fire_at_ms: NOW_MS + 5 * HOUR_MS,
        }
    );
}

#[test]
fn drained_requests_cancel_before_registering() {
    let (controller, outbox, _clock) = controller();
    controller.toggle().unwrap();

    let kinds = outbox
        .drain()
        .into_iter()
        .map(|request| match request {
            HostRequest::Cancel { .. } => "cancel",
            HostRequest::ScheduleRecurring { .. } => "recurring",
            HostRequest::ScheduleOneShot { .. } => "one_shot",
        })
        .collect::<Vec<_>>();
    assert_eq!(kinds, vec!["cancel", "cancel", "recurring"]);
    assert_eq!(outbox.pending_len(), 0);
}

#[test]
fn snooze_replaces_prior_snooze() {
    let (controller, outbox, clock) = controller();

    controller.snooze().unwrap();
    clock.advance_ms(2 * 60 * 1000);
    let fire_at = controller.snooze().unwrap();

    assert_eq!(fire_at, NOW_MS + 2 * 60 * 1000 + SNOOZE_DELAY_MS);
    assert_eq!(
        outbox.registrations(),
        vec![HostRequest::ScheduleOneShot {
            name: SNOOZE_ALARM_JOB.to_string(),
            fire_at_ms: fire_at,
        }]
    );
}

#[test]
fn disabling_cancels_pending_snooze() {
    let (controller, outbox, _clock) = controller();

    controller.toggle().unwrap();
    controller.snooze().unwrap();
    controller.toggle().unwrap();

    assert!(outbox.registrations().is_empty());
}

#[test]
fn scheduler_failure_keeps_alarm_disabled() {
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let controller = AlarmController::new(Arc::new(FailingScheduler), clock);

    assert!(controller.toggle().is_err());
    assert!(!controller.is_enabled());
    assert!(controller.upcoming().get().is_empty());
    assert!(!controller.show_confirmation().get());
}
