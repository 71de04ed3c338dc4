//! Routing of music notification actions to the active playback controller.
//!
//! The relay is owned by the composition root and handed to whoever receives
//! notification taps. A controller registers itself for its lifetime; the
//! returned guard deregisters on drop.
//!
//! # Invariants
//! - At most one target is registered; registering again replaces it.
//! - The relay never keeps a target alive (weak reference only).
//! - Unknown command names and missing targets are graceful no-ops.

use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

pub const ACTION_PLAY: &str = "zcmh.action.PLAY";
pub const ACTION_PAUSE: &str = "zcmh.action.PAUSE";
pub const ACTION_NEXT: &str = "zcmh.action.NEXT";
pub const ACTION_PREVIOUS: &str = "zcmh.action.PREVIOUS";
pub const ACTION_STOP: &str = "zcmh.action.STOP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCommand {
    Play,
    Pause,
    Next,
    Previous,
    Stop,
}

impl MusicCommand {
    pub const ALL: [MusicCommand; 5] = [
        Self::Play,
        Self::Pause,
        Self::Next,
        Self::Previous,
        Self::Stop,
    ];

    /// Relay command name, e.g. `PLAY`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Play => "PLAY",
            Self::Pause => "PAUSE",
            Self::Next => "NEXT",
            Self::Previous => "PREVIOUS",
            Self::Stop => "STOP",
        }
    }

    /// Notification action identifier bound to this command.
    pub fn action_id(self) -> &'static str {
        match self {
            Self::Play => ACTION_PLAY,
            Self::Pause => ACTION_PAUSE,
            Self::Next => ACTION_NEXT,
            Self::Previous => ACTION_PREVIOUS,
            Self::Stop => ACTION_STOP,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == name.trim())
    }

    pub fn from_action(action_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|command| command.action_id() == action_id)
    }
}

/// Receiver of relayed music commands.
pub trait MusicCommandTarget: Send {
    fn handle_command(&mut self, command: MusicCommand);
}

/// Result of one relay dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered(MusicCommand),
    /// The name or action was not one of the five known commands.
    Ignored,
    /// No live controller is registered.
    NoTarget(MusicCommand),
}

type SharedTarget = Mutex<dyn MusicCommandTarget>;

struct ActiveTarget {
    generation: u64,
    target: Weak<SharedTarget>,
}

#[derive(Default)]
struct RelayState {
    next_generation: u64,
    active: Option<ActiveTarget>,
}

#[derive(Default)]
pub struct MusicCommandRelay {
    state: Mutex<RelayState>,
}

/// Keeps a relay registration alive; deregisters on drop.
///
/// Dropping a stale guard leaves a newer registration untouched.
#[must_use = "dropping the registration deregisters the target immediately"]
pub struct RelayRegistration {
    relay: Weak<MusicCommandRelay>,
    generation: u64,
}

impl Drop for RelayRegistration {
    fn drop(&mut self) {
        if let Some(relay) = self.relay.upgrade() {
            relay.clear_generation(self.generation);
        }
    }
}

impl MusicCommandRelay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers `target` as the active controller, replacing any other.
    pub fn register<T>(self: &Arc<Self>, target: &Arc<Mutex<T>>) -> RelayRegistration
    where
        T: MusicCommandTarget + 'static,
    {
        let shared: Arc<SharedTarget> = target.clone();
        let mut state = self.lock();
        let generation = state.next_generation;
        state.next_generation += 1;
        state.active = Some(ActiveTarget {
            generation,
            target: Arc::downgrade(&shared),
        });
        info!("event=relay_register module=playback status=ok generation={generation}");

        RelayRegistration {
            relay: Arc::downgrade(self),
            generation,
        }
    }

    /// Drops the active registration, whoever owns it.
    pub fn clear(&self) {
        if self.lock().active.take().is_some() {
            info!("event=relay_clear module=playback status=ok");
        }
    }

    pub fn has_target(&self) -> bool {
        self.live_target().is_some()
    }

    /// Dispatches a command by relay name (`PLAY`, `PAUSE`, ...).
    pub fn dispatch(&self, name: &str) -> DispatchOutcome {
        match MusicCommand::from_name(name) {
            Some(command) => self.dispatch_command(command),
            None => {
                debug!("event=relay_dispatch module=playback status=ignored name={name}");
                DispatchOutcome::Ignored
            }
        }
    }

    /// Dispatches a command by notification action identifier.
    pub fn dispatch_action(&self, action_id: &str) -> DispatchOutcome {
        match MusicCommand::from_action(action_id) {
            Some(command) => self.dispatch_command(command),
            None => {
                debug!("event=relay_dispatch module=playback status=ignored action={action_id}");
                DispatchOutcome::Ignored
            }
        }
    }

    pub fn dispatch_command(&self, command: MusicCommand) -> DispatchOutcome {
        let Some(target) = self.live_target() else {
            debug!(
                "event=relay_dispatch module=playback status=no_target command={}",
                command.name()
            );
            return DispatchOutcome::NoTarget(command);
        };

        let mut target = target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        target.handle_command(command);
        debug!(
            "event=relay_dispatch module=playback status=ok command={}",
            command.name()
        );
        DispatchOutcome::Delivered(command)
    }

    fn live_target(&self) -> Option<Arc<SharedTarget>> {
        let mut state = self.lock();
        let target = state.active.as_ref()?.target.upgrade();
        if target.is_none() {
            warn!("event=relay_dispatch module=playback status=stale_target");
            state.active = None;
        }
        target
    }

    fn clear_generation(&self, generation: u64) {
        let mut state = self.lock();
        if state
            .active
            .as_ref()
            .is_some_and(|active| active.generation == generation)
        {
            state.active = None;
            info!("event=relay_clear module=playback status=ok generation={generation}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, RelayState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
