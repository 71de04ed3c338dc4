//! Queue-backed [`JobScheduler`] for hosts that execute requests themselves.
//!
//! Core records every scheduler call; the host drains the queue and forwards
//! each request to its native job/alarm API. The outbox also mirrors the
//! registrations that should currently be live.

use super::scheduler::JobScheduler;
use super::HostResult;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostRequest {
    ScheduleRecurring {
        name: String,
        interval_ms: i64,
        first_fire_at_ms: i64,
    },
    ScheduleOneShot {
        name: String,
        fire_at_ms: i64,
    },
    Cancel {
        name: String,
    },
}

impl HostRequest {
    pub fn name(&self) -> &str {
        match self {
            Self::ScheduleRecurring { name, .. }
            | Self::ScheduleOneShot { name, .. }
            | Self::Cancel { name } => name,
        }
    }
}

#[derive(Debug, Default)]
struct OutboxState {
    pending: Vec<HostRequest>,
    registrations: BTreeMap<String, HostRequest>,
}

#[derive(Debug, Default)]
pub struct OutboxScheduler {
    state: Mutex<OutboxState>,
}

impl OutboxScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every request recorded since the last drain.
    pub fn drain(&self) -> Vec<HostRequest> {
        std::mem::take(&mut self.lock().pending)
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Registrations that are live after applying every recorded request.
    pub fn registrations(&self) -> Vec<HostRequest> {
        self.lock().registrations.values().cloned().collect()
    }

    pub fn registration(&self, name: &str) -> Option<HostRequest> {
        self.lock().registrations.get(name).cloned()
    }

    fn record(&self, request: HostRequest) {
        let mut state = self.lock();
        match &request {
            HostRequest::Cancel { name } => {
                state.registrations.remove(name);
            }
            other => {
                state
                    .registrations
                    .insert(other.name().to_string(), other.clone());
            }
        }
        state.pending.push(request);
    }

    fn lock(&self) -> MutexGuard<'_, OutboxState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JobScheduler for OutboxScheduler {
    fn schedule_recurring(
        &self,
        name: &str,
        interval_ms: i64,
        first_fire_at_ms: i64,
    ) -> HostResult<()> {
        self.record(HostRequest::ScheduleRecurring {
            name: name.to_string(),
            interval_ms,
            first_fire_at_ms,
        });
        Ok(())
    }

    fn schedule_one_shot(&self, name: &str, fire_at_ms: i64) -> HostResult<()> {
        self.record(HostRequest::ScheduleOneShot {
            name: name.to_string(),
            fire_at_ms,
        });
        Ok(())
    }

    fn cancel(&self, name: &str) -> HostResult<()> {
        self.record(HostRequest::Cancel {
            name: name.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{HostRequest, JobScheduler, OutboxScheduler};

    #[test]
    fn registrations_follow_schedule_and_cancel() {
        let outbox = OutboxScheduler::new();
        outbox.schedule_recurring("job", 1_000, 5_000).unwrap();
        outbox.schedule_one_shot("snooze", 9_000).unwrap();
        outbox.cancel("job").unwrap();

        assert_eq!(
            outbox.registrations(),
            vec![HostRequest::ScheduleOneShot {
                name: "snooze".to_string(),
                fire_at_ms: 9_000,
            }]
        );
        assert_eq!(outbox.drain().len(), 3);
        assert_eq!(outbox.pending_len(), 0);
        assert!(outbox.registration("snooze").is_some());
    }

    #[test]
    fn rescheduling_replaces_registration() {
        let outbox = OutboxScheduler::new();
        outbox.schedule_one_shot("snooze", 1).unwrap();
        outbox.schedule_one_shot("snooze", 2).unwrap();

        assert_eq!(outbox.registrations().len(), 1);
        assert_eq!(
            outbox.registration("snooze"),
            Some(HostRequest::ScheduleOneShot {
                name: "snooze".to_string(),
                fire_at_ms: 2,
            })
        );
    }
}
