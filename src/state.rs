use crate::config::{ModeKind, ServiceConfig};
use crate::models::AppData;
use crate::tracker::{
    LiveProvider, MonotonicClock, SessionInfo, TelemetryHub, Tracker, TrackerError, TrackingMode,
};
use chrono::Local;
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::sync::Mutex;
use tokio::time::Instant;

/// A tracker plus the handle used to feed it, when it is fed by a device.
pub struct Session {
    pub mode: ModeKind,
    pub tracker: Tracker,
    pub live: Option<Arc<LiveProvider>>,
    pub opened_at: Instant,
}

impl Session {
    pub fn open(
        info: SessionInfo,
        mode: ModeKind,
        config: &ServiceConfig,
        telemetry: Arc<TelemetryHub>,
    ) -> Result<Self, TrackerError> {
        let (tracking_mode, live) = match mode {
            ModeKind::Live => {
                let provider = Arc::new(LiveProvider::new());
                (TrackingMode::Live(provider.clone()), Some(provider))
            }
            ModeKind::Simulated => (TrackingMode::Simulated(config.simulation), None),
        };
        let tracker = Tracker::with_options(
            info,
            telemetry,
            tracking_mode,
            config.tracker,
            Arc::new(MonotonicClock::new()),
        )?;
        Ok(Self {
            mode,
            tracker,
            live,
            opened_at: Instant::now(),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub sessions: Arc<Mutex<HashMap<String, Arc<Session>>>>,
    pub telemetry: Arc<TelemetryHub>,
    next_session: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(config: ServiceConfig, data: AppData) -> Self {
        Self {
            data_path: config.data_path.clone(),
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            telemetry: Arc::new(TelemetryHub::new()),
            next_session: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn next_session_id(&self) -> String {
        let seq = self.next_session.fetch_add(1, Ordering::Relaxed);
        format!("run-{}-{seq}", Local::now().format("%Y%m%d%H%M%S"))
    }
}

/// Removes the oldest sessions that are no longer tracking until at most
/// `keep` of them remain. Returns the removed session ids.
pub fn evict_idle(sessions: &mut HashMap<String, Arc<Session>>, keep: usize) -> Vec<String> {
    let mut idle: Vec<(Instant, String)> = sessions
        .iter()
        .filter(|(_, session)| !session.tracker.is_tracking())
        .map(|(id, session)| (session.opened_at, id.clone()))
        .collect();
    if idle.len() <= keep {
        return Vec::new();
    }

    idle.sort();
    let excess = idle.len() - keep;
    idle.into_iter()
        .take(excess)
        .map(|(_, id)| {
            sessions.remove(&id);
            id
        })
        .collect()
}
