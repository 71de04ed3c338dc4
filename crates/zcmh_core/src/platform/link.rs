//! Outbound URL dispatch contract.

use super::HostResult;

pub trait LinkDispatcher: Send + Sync {
    /// Opens `url` in the dedicated target app.
    fn open_in_app(&self, url: &str) -> HostResult<()>;
    /// Opens `url` through the generic handler (usually a browser).
    fn open_generic(&self, url: &str) -> HostResult<()>;
}
