//! Meal-reminder alarm: scheduling, ringing and notification actions.
//!
//! # Responsibility
//! - Keep at most one recurring meal reminder registered with the host.
//! - Turn scheduler fires and notification taps into device behavior.
//!
//! # Invariants
//! - Enabling always cancels before registering.
//! - Disabling cancels both the recurring job and a pending snooze.
//! - Receiver paths never propagate host failures.

use crate::platform::HostError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod controller;
pub mod receiver;
pub mod ringer;
pub mod scheduler;

pub use controller::AlarmController;
pub use receiver::{AlarmReceiver, AlarmSignal};
pub use ringer::AlarmRinger;
pub use scheduler::AlarmScheduler;

/// Identifier of the "already ate" notification action.
pub const ACTION_DISMISS: &str = "zcmh.action.ALARM_DISMISS";
/// Identifier of the "snooze 10 minutes" notification action.
pub const ACTION_SNOOZE: &str = "zcmh.action.ALARM_SNOOZE";

pub type AlarmResult<T> = Result<T, AlarmError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmError {
    Host(HostError),
}

impl Display for AlarmError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Host(err) => write!(f, "alarm scheduling failed: {err}"),
        }
    }
}

impl Error for AlarmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Host(err) => Some(err),
        }
    }
}

impl From<HostError> for AlarmError {
    fn from(value: HostError) -> Self {
        Self::Host(value)
    }
}
