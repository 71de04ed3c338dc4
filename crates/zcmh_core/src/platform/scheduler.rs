//! Durable job scheduler contract.
//!
//! Registrations outlive the app process. The host delivers fires back as
//! alarm signals, possibly while no controller is alive.

use super::HostResult;

pub trait JobScheduler: Send + Sync {
    /// Registers a periodic job under `name`, replacing any existing one.
    fn schedule_recurring(
        &self,
        name: &str,
        interval_ms: i64,
        first_fire_at_ms: i64,
    ) -> HostResult<()>;

    /// Registers a single exact wake-up under `name`, replacing any pending one.
    fn schedule_one_shot(&self, name: &str, fire_at_ms: i64) -> HostResult<()>;

    /// Cancels the registration under `name`. Unknown names are a no-op.
    fn cancel(&self, name: &str) -> HostResult<()>;
}
