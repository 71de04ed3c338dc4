mod common;

use common::FakeEngine;
use std::sync::{Arc, Mutex};
use zcmh_core::platform::ManualClock;
use zcmh_core::playback::relay::{
    ACTION_NEXT, ACTION_PAUSE, ACTION_PLAY, ACTION_PREVIOUS, ACTION_STOP,
};
use zcmh_core::playback::{DispatchOutcome, MusicCommand, MusicCommandRelay, PlaybackController};

fn shared_controller(engine: &Arc<FakeEngine>) -> Arc<Mutex<PlaybackController>> {
    let clock = Arc::new(ManualClock::new(0));
    Arc::new(Mutex::new(PlaybackController::new(engine.clone(), clock)))
}

#[test]
fn commands_reach_the_registered_controller() {
    let engine = FakeEngine::new(60_000);
    let controller = shared_controller(&engine);
    let relay = MusicCommandRelay::new();
    let _registration = relay.register(&controller);

    assert_eq!(relay.dispatch("PLAY"), DispatchOutcome::Delivered(MusicCommand::Play));
    assert!(controller.lock().unwrap().state().get().is_playing);

    assert_eq!(relay.dispatch("PAUSE"), DispatchOutcome::Delivered(MusicCommand::Pause));
    assert!(!controller.lock().unwrap().state().get().is_playing);

    assert_eq!(
        relay.dispatch_action(ACTION_NEXT),
        DispatchOutcome::Delivered(MusicCommand::Next)
    );
    assert_eq!(controller.lock().unwrap().state().get().current_track_index, 1);

    relay.dispatch_action(ACTION_STOP);
    assert_eq!(engine.live_sessions(), 0);
}

#[test]
fn every_notification_action_reaches_the_controller() {
    let engine = FakeEngine::new(60_000);
    let controller = shared_controller(&engine);
    let relay = MusicCommandRelay::new();
    let _registration = relay.register(&controller);

    assert_eq!(
        relay.dispatch_action(ACTION_PLAY),
        DispatchOutcome::Delivered(MusicCommand::Play)
    );
    assert!(controller.lock().unwrap().state().get().is_playing);

    assert_eq!(
        relay.dispatch_action(ACTION_PAUSE),
        DispatchOutcome::Delivered(MusicCommand::Pause)
    );
    assert!(!controller.lock().unwrap().state().get().is_playing);

    assert_eq!(
        relay.dispatch_action(ACTION_NEXT),
        DispatchOutcome::Delivered(MusicCommand::Next)
    );
    assert_eq!(controller.lock().unwrap().state().get().current_track_index, 1);

    assert_eq!(
        relay.dispatch_action(ACTION_PREVIOUS),
        DispatchOutcome::Delivered(MusicCommand::Previous)
    );
    let state = controller.lock().unwrap().state().get();
    assert_eq!(state.current_track_index, 0);
    assert!(state.is_playing);

    assert_eq!(
        relay.dispatch_action(ACTION_STOP),
        DispatchOutcome::Delivered(MusicCommand::Stop)
    );
    assert!(!controller.lock().unwrap().state().get().is_playing);
    assert_eq!(engine.live_sessions(), 0);
}

#[test]
fn action_ids_and_command_names_are_not_interchangeable() {
    let engine = FakeEngine::new(60_000);
    let controller = shared_controller(&engine);
    let relay = MusicCommandRelay::new();
    let _registration = relay.register(&controller);

    assert_eq!(relay.dispatch_action("PLAY"), DispatchOutcome::Ignored);
    assert_eq!(relay.dispatch(ACTION_PLAY), DispatchOutcome::Ignored);
    assert!(!controller.lock().unwrap().state().get().is_playing);
    for command in MusicCommand::ALL {
        assert_eq!(MusicCommand::from_action(command.action_id()), Some(command));
    }
}

#[test]
fn unknown_names_are_ignored() {
    let relay = MusicCommandRelay::new();

    assert_eq!(relay.dispatch("play"), DispatchOutcome::Ignored);
    assert_eq!(relay.dispatch("REWIND"), DispatchOutcome::Ignored);
    assert_eq!(relay.dispatch_action("zcmh.action.UNKNOWN"), DispatchOutcome::Ignored);
}

#[test]
fn dispatch_without_target_is_a_no_op() {
    let relay = MusicCommandRelay::new();

    assert_eq!(relay.dispatch("NEXT"), DispatchOutcome::NoTarget(MusicCommand::Next));
    assert!(!relay.has_target());
}

#[test]
fn dropping_the_registration_deregisters() {
    let engine = FakeEngine::new(60_000);
    let controller = shared_controller(&engine);
    let relay = MusicCommandRelay::new();

    let registration = relay.register(&controller);
    assert!(relay.has_target());
    drop(registration);

    assert_eq!(relay.dispatch("PLAY"), DispatchOutcome::NoTarget(MusicCommand::Play));
    assert!(!controller.lock().unwrap().state().get().is_playing);
}

#[test]
fn stale_registration_does_not_clear_its_replacement() {
    let engine = FakeEngine::new(60_000);
    let first = shared_controller(&engine);
    let second = shared_controller(&engine);
    let relay = MusicCommandRelay::new();

    let first_registration = relay.register(&first);
    let _second_registration = relay.register(&second);
    drop(first_registration);

    assert_eq!(relay.dispatch("PLAY"), DispatchOutcome::Delivered(MusicCommand::Play));
    assert!(second.lock().unwrap().state().get().is_playing);
    assert!(!first.lock().unwrap().state().get().is_playing);
}

#[test]
fn dead_controller_is_never_reached() {
    let engine = FakeEngine::new(60_000);
    let controller = shared_controller(&engine);
    let relay = MusicCommandRelay::new();
    let _registration = relay.register(&controller);

    drop(controller);

    assert_eq!(relay.dispatch("STOP"), DispatchOutcome::NoTarget(MusicCommand::Stop));
    assert!(!relay.has_target());
}

#[test]
fn clear_removes_any_registration() {
    let engine = FakeEngine::new(60_000);
    let controller = shared_controller(&engine);
    let relay = MusicCommandRelay::new();
    let _registration = relay.register(&controller);

    relay.clear();

    assert!(!relay.has_target());
}
