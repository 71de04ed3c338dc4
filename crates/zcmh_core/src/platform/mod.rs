//! Narrow contracts over host-OS services.
//!
//! # Responsibility
//! - Describe every host facility core logic depends on (clock, durable job
//!   scheduler, media decoder, alarm device, music notification, URL
//!   dispatch) as a trait.
//! - Keep platform APIs out of controllers so any host can satisfy them.
//!
//! # Invariants
//! - Host services are shared handles: every method takes `&self`.
//! - Host failures surface as [`HostError`]; callers decide whether to degrade.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod clock;
pub mod device;
pub mod link;
pub mod media;
pub mod notifier;
pub mod outbox;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use device::{AlarmDevice, AlarmNotification, NotificationAction, ToneSource};
pub use link::LinkDispatcher;
pub use media::{MediaEngine, MediaSession};
pub use notifier::{MusicNotification, MusicNotifier};
pub use outbox::{HostRequest, OutboxScheduler};
pub use scheduler::JobScheduler;

pub type HostResult<T> = Result<T, HostError>;

/// Failure reported by a host service adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostError {
    /// Short service name, e.g. `scheduler` or `media`.
    pub service: &'static str,
    pub message: String,
}

impl HostError {
    pub fn new(service: &'static str, message: impl Into<String>) -> Self {
        Self {
            service,
            message: message.into(),
        }
    }
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} host error: {}", self.service, self.message)
    }
}

impl Error for HostError {}
