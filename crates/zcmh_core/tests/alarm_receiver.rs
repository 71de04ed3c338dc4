mod common;

use common::{DeviceCall, FailingScheduler, RecordingDevice};
use std::sync::Arc;
use zcmh_core::alarm::receiver::{
    meal_notification, MEAL_CHANNEL_ID, MEAL_NOTIFICATION_ID, VIBRATION_PATTERN_MS,
    WAKE_LOCK_DURATION,
};
use zcmh_core::alarm::ringer::TONE_MAX_DURATION_MS;
use zcmh_core::alarm::scheduler::{SNOOZE_ALARM_JOB, SNOOZE_DELAY_MS};
use zcmh_core::alarm::{AlarmReceiver, AlarmSignal, ACTION_DISMISS, ACTION_SNOOZE};
use zcmh_core::platform::{HostRequest, ManualClock, OutboxScheduler, ToneSource};

const NOW_MS: i64 = 1_761_905_100_000;

struct Harness {
    receiver: AlarmReceiver,
    device: Arc<RecordingDevice>,
    outbox: Arc<OutboxScheduler>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let device = RecordingDevice::new();
    let outbox = Arc::new(OutboxScheduler::new());
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let receiver = AlarmReceiver::new(device.clone(), outbox.clone(), clock.clone());
    Harness {
        receiver,
        device,
        outbox,
        clock,
    }
}

#[test]
fn fire_wakes_rings_vibrates_and_notifies() {
    let mut h = harness();

    let signal = h.receiver.handle_action(None);

    assert_eq!(signal, AlarmSignal::Fire);
    assert_eq!(
        h.device.calls(),
        vec![
            DeviceCall::WakeLock(WAKE_LOCK_DURATION),
            DeviceCall::StopTone,
            DeviceCall::PlayTone(ToneSource::Alarm),
            DeviceCall::Vibrate(VIBRATION_PATTERN_MS.to_vec()),
            DeviceCall::Notify(meal_notification()),
        ]
    );
    assert!(h.receiver.ringer().is_ringing());
}

#[test]
fn unknown_action_is_treated_as_fire() {
    assert_eq!(
        AlarmSignal::from_action(Some("android.intent.action.BOOT")),
        AlarmSignal::Fire
    );
    assert_eq!(AlarmSignal::from_action(Some(ACTION_DISMISS)), AlarmSignal::Dismiss);
    assert_eq!(AlarmSignal::from_action(Some(ACTION_SNOOZE)), AlarmSignal::Snooze);
}

#[test]
fn notification_carries_both_actions() {
    let notification = meal_notification();

    assert_eq!(notification.id, MEAL_NOTIFICATION_ID);
    assert_eq!(notification.channel_id, MEAL_CHANNEL_ID);
    assert_eq!(notification.title, "⏰ Waktunya Makan!");
    let action_ids = notification
        .actions
        .iter()
        .map(|action| action.action_id)
        .collect::<Vec<_>>();
    assert_eq!(action_ids, vec![ACTION_DISMISS, ACTION_SNOOZE]);
    assert_eq!(notification.actions[0].label, "Sudah Makan");
    assert_eq!(notification.actions[1].label, "Tunda 10 Menit");
}

#[test]
fn dismiss_stops_the_tone_without_scheduling() {
    let mut h = harness();
    h.receiver.handle_action(None);
    h.device.clear();

    h.receiver.handle_action(Some(ACTION_DISMISS));

    assert_eq!(h.device.calls(), vec![DeviceCall::StopTone]);
    assert!(!h.receiver.ringer().is_ringing());
    assert!(h.outbox.registrations().is_empty());
}

#[test]
fn snooze_stops_the_tone_and_schedules_ten_minutes_out() {
    let mut h = harness();
    h.receiver.handle_action(None);

    h.receiver.handle_action(Some(ACTION_SNOOZE));

    assert!(!h.receiver.ringer().is_ringing());
    assert_eq!(
        h.outbox.registration(SNOOZE_ALARM_JOB),
        Some(HostRequest::ScheduleOneShot {
            name: SNOOZE_ALARM_JOB.to_string(),
            fire_at_ms: NOW_MS + SNOOZE_DELAY_MS,
        })
    );
}

#[test]
fn snooze_with_failing_scheduler_is_swallowed() {
    let device = RecordingDevice::new();
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let mut receiver = AlarmReceiver::new(device.clone(), Arc::new(FailingScheduler), clock);

    assert_eq!(receiver.handle_action(Some(ACTION_SNOOZE)), AlarmSignal::Snooze);
    assert_eq!(device.calls(), vec![DeviceCall::StopTone]);
}

#[test]
fn missing_alarm_tone_falls_back_to_notification_sound() {
    let mut h = harness();
    h.device.without_tone(ToneSource::Alarm);

    h.receiver.handle_action(None);

    assert_eq!(h.receiver.ringer().active_source(), Some(ToneSource::Notification));
    assert!(h
        .device
        .calls()
        .contains(&DeviceCall::PlayTone(ToneSource::Notification)));
}

#[test]
fn no_tone_at_all_still_vibrates_and_notifies() {
    let mut h = harness();
    h.device.without_tone(ToneSource::Alarm);
    h.device.without_tone(ToneSource::Notification);

    h.receiver.handle_action(None);

    assert!(!h.receiver.ringer().is_ringing());
    let calls = h.device.calls();
    assert!(calls.contains(&DeviceCall::Vibrate(VIBRATION_PATTERN_MS.to_vec())));
    assert!(calls.contains(&DeviceCall::Notify(meal_notification())));
}

#[test]
fn tone_stops_after_sixty_seconds() {
    let mut h = harness();
    h.receiver.handle_action(None);

    h.clock.advance_ms(TONE_MAX_DURATION_MS - 1);
    assert!(!h.receiver.tick());
    assert!(h.receiver.ringer().is_ringing());

    h.clock.advance_ms(1);
    assert!(h.receiver.tick());
    assert!(!h.receiver.ringer().is_ringing());
    assert_eq!(h.device.calls().last(), Some(&DeviceCall::StopTone));
}

#[test]
fn second_fire_replaces_the_ring_in_progress() {
    let mut h = harness();
    h.receiver.handle_action(None);
    h.clock.advance_ms(30_000);
    h.receiver.handle_action(None);

    h.clock.advance_ms(40_000);
    assert!(!h.receiver.tick());

    let plays = h
        .device
        .calls()
        .into_iter()
        .filter(|call| matches!(call, DeviceCall::PlayTone(_)))
        .count();
    assert_eq!(plays, 2);
}

#[test]
fn dropping_the_receiver_silences_the_tone() {
    let mut h = harness();
    h.receiver.handle_action(None);
    h.device.clear();

    drop(h.receiver);

    assert_eq!(h.device.calls(), vec![DeviceCall::StopTone]);
}
