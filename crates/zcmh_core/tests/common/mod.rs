//! Recording fakes for the host service traits.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zcmh_core::model::music::AudioResource;
use zcmh_core::platform::{
    AlarmDevice, AlarmNotification, HostError, HostResult, JobScheduler, LinkDispatcher,
    MediaEngine, MediaSession, MusicNotification, MusicNotifier, ToneSource,
};

/// Per-session snapshot shared between a fake session and its engine.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionLog {
    pub resource: &'static str,
    pub started: u32,
    pub paused: u32,
    pub stopped: u32,
    pub released: u32,
    pub looping: bool,
    pub position_ms: u64,
}

#[derive(Default)]
pub struct FakeEngine {
    pub sessions: Mutex<Vec<Arc<Mutex<SessionLog>>>>,
    pub failing: Mutex<HashSet<&'static str>>,
    pub duration_ms: u64,
}

impl FakeEngine {
    pub fn new(duration_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            duration_ms,
            ..Self::default()
        })
    }

    pub fn fail_on(&self, resource: &'static str) {
        self.failing.lock().unwrap().insert(resource);
    }

    pub fn loads(&self) -> Vec<&'static str> {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .map(|log| log.lock().unwrap().resource)
            .collect()
    }

    pub fn session(&self, index: usize) -> SessionLog {
        self.sessions.lock().unwrap()[index].lock().unwrap().clone()
    }

    pub fn last_session(&self) -> SessionLog {
        let sessions = self.sessions.lock().unwrap();
        let last = sessions.last().unwrap().lock().unwrap().clone();
        last
    }

    /// Sessions loaded but not yet released.
    pub fn live_sessions(&self) -> usize {
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|log| log.lock().unwrap().released == 0)
            .count()
    }

    pub fn set_position(&self, position_ms: u64) {
        let sessions = self.sessions.lock().unwrap();
        if let Some(log) = sessions.last() {
            log.lock().unwrap().position_ms = position_ms;
        }
    }
}

impl MediaEngine for FakeEngine {
    fn load(&self, resource: AudioResource) -> HostResult<Box<dyn MediaSession>> {
        if self.failing.lock().unwrap().contains(resource.name()) {
            return Err(HostError::new("media", format!("cannot decode {}", resource.name())));
        }
        let log = Arc::new(Mutex::new(SessionLog {
            resource: resource.name(),
            ..SessionLog::default()
        }));
        self.sessions.lock().unwrap().push(Arc::clone(&log));
        Ok(Box::new(FakeSession {
            log,
            duration_ms: self.duration_ms,
        }))
    }
}

pub struct FakeSession {
    log: Arc<Mutex<SessionLog>>,
    duration_ms: u64,
}

impl MediaSession for FakeSession {
    fn start(&mut self) {
        self.log.lock().unwrap().started += 1;
    }

    fn pause(&mut self) {
        self.log.lock().unwrap().paused += 1;
    }

    fn stop(&mut self) {
        self.log.lock().unwrap().stopped += 1;
    }

    fn seek_to(&mut self, position_ms: u64) {
        self.log.lock().unwrap().position_ms = position_ms.min(self.duration_ms);
    }

    fn position_ms(&self) -> u64 {
        self.log.lock().unwrap().position_ms
    }

    fn duration_ms(&self) -> Option<u64> {
        Some(self.duration_ms)
    }

    fn set_looping(&mut self, looping: bool) {
        self.log.lock().unwrap().looping = looping;
    }

    fn release(&mut self) {
        self.log.lock().unwrap().released += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCall {
    WakeLock(Duration),
    PlayTone(ToneSource),
    StopTone,
    Vibrate(Vec<u64>),
    Notify(AlarmNotification),
}

#[derive(Default)]
pub struct RecordingDevice {
    pub calls: Mutex<Vec<DeviceCall>>,
    pub unavailable_tones: Mutex<HashSet<ToneSource>>,
}

impl RecordingDevice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn without_tone(&self, source: ToneSource) {
        self.unavailable_tones.lock().unwrap().insert(source);
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn push(&self, call: DeviceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl AlarmDevice for RecordingDevice {
    fn acquire_wake_lock(&self, duration: Duration) -> HostResult<()> {
        self.push(DeviceCall::WakeLock(duration));
        Ok(())
    }

    fn play_tone(&self, source: ToneSource) -> HostResult<()> {
        if self.unavailable_tones.lock().unwrap().contains(&source) {
            return Err(HostError::new("tone", format!("{source:?} tone unavailable")));
        }
        self.push(DeviceCall::PlayTone(source));
        Ok(())
    }

    fn stop_tone(&self) -> HostResult<()> {
        self.push(DeviceCall::StopTone);
        Ok(())
    }

    fn vibrate(&self, pattern_ms: &[u64]) -> HostResult<()> {
        self.push(DeviceCall::Vibrate(pattern_ms.to_vec()));
        Ok(())
    }

    fn post_notification(&self, notification: &AlarmNotification) -> HostResult<()> {
        self.push(DeviceCall::Notify(notification.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Show(MusicNotification),
    Hide,
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub calls: Mutex<Vec<NotifierCall>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<NotifierCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Most recently shown notification, if the last call was a show.
    pub fn showing(&self) -> Option<MusicNotification> {
        match self.calls.lock().unwrap().last() {
            Some(NotifierCall::Show(notification)) => Some(notification.clone()),
            _ => None,
        }
    }
}

impl MusicNotifier for RecordingNotifier {
    fn show(&self, notification: &MusicNotification) -> HostResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(NotifierCall::Show(notification.clone()));
        Ok(())
    }

    fn hide(&self) -> HostResult<()> {
        self.calls.lock().unwrap().push(NotifierCall::Hide);
        Ok(())
    }
}

/// Scheduler whose every call fails.
#[derive(Default)]
pub struct FailingScheduler;

impl JobScheduler for FailingScheduler {
    fn schedule_recurring(&self, _name: &str, _interval_ms: i64, _first: i64) -> HostResult<()> {
        Err(HostError::new("scheduler", "job service unavailable"))
    }

    fn schedule_one_shot(&self, _name: &str, _fire_at_ms: i64) -> HostResult<()> {
        Err(HostError::new("scheduler", "exact alarms not permitted"))
    }

    fn cancel(&self, _name: &str) -> HostResult<()> {
        Err(HostError::new("scheduler", "job service unavailable"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCall {
    InApp(String),
    Generic(String),
}

#[derive(Default)]
pub struct RecordingLinkDispatcher {
    pub calls: Mutex<Vec<LinkCall>>,
    pub app_installed: bool,
    pub browser_available: bool,
}

impl RecordingLinkDispatcher {
    pub fn new(app_installed: bool, browser_available: bool) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            app_installed,
            browser_available,
        }
    }

    pub fn calls(&self) -> Vec<LinkCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl LinkDispatcher for RecordingLinkDispatcher {
    fn open_in_app(&self, url: &str) -> HostResult<()> {
        self.calls.lock().unwrap().push(LinkCall::InApp(url.to_string()));
        if self.app_installed {
            Ok(())
        } else {
            Err(HostError::new("link", "no activity found for whatsapp"))
        }
    }

    fn open_generic(&self, url: &str) -> HostResult<()> {
        self.calls.lock().unwrap().push(LinkCall::Generic(url.to_string()));
        if self.browser_available {
            Ok(())
        } else {
            Err(HostError::new("link", "no handler for url"))
        }
    }
}
