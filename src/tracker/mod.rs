//! GPS run tracking.
//!
//! A [`Tracker`] consumes fixes from a [`LocationProvider`], drops
//! low-accuracy fixes and implausible jumps, accumulates Haversine distance
//! and publishes throttled [`TelemetryFrame`]s to a [`TelemetrySink`].

pub mod clock;
pub mod error;
pub mod fix;
pub mod geo;
pub mod provider;
pub mod run;
pub mod simulation;
pub mod sink;
pub mod throttle;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::TrackerError;
pub use fix::{LocationError, LocationEvent, PositionFix};
pub use provider::{EventCallback, LiveProvider, LocationProvider, WatchHandle, WatchOptions};
pub use run::{ActiveRun, FixOutcome};
pub use simulation::{SimulatedProvider, SimulationConfig, Simulator};
pub use sink::{TelemetryFrame, TelemetryHub, TelemetrySink};

use geo::round3;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

pub const PERMISSION_DENIED_NOTICE: &str =
    "Location permission was denied. Allow location access and start tracking again.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Fixes reporting a worse accuracy radius (metres) are ignored.
    pub max_accuracy_m: f64,
    /// Steps at or above this length (km) are treated as GPS jumps.
    pub max_step_km: f64,
    pub emit_interval_ms: i64,
    pub watch: WatchOptions,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_accuracy_m: 20.0,
            max_step_km: 0.1,
            emit_interval_ms: 1_000,
            watch: WatchOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub session_id: String,
    pub user_id: String,
}

impl SessionInfo {
    pub fn new(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Where this session's telemetry frames are published.
    pub fn destination(&self) -> String {
        format!("/app/running/{}/location", self.session_id)
    }
}

pub enum TrackingMode {
    Live(Arc<dyn LocationProvider>),
    Simulated(SimulationConfig),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerStatus {
    pub is_tracking: bool,
    /// Kilometres, full precision.
    pub total_distance: f64,
    pub running_time: u64,
}

/// Totals frozen when a run stops.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishedRun {
    pub started_at_ms: i64,
    pub total_distance_km: f64,
    pub running_time_sec: u64,
}

enum TrackerState {
    Idle { finished: Option<FinishedRun> },
    Tracking { run: ActiveRun, watch: WatchHandle },
}

struct Shared {
    session: SessionInfo,
    config: TrackerConfig,
    sink: Arc<dyn TelemetrySink>,
    clock: Arc<dyn Clock>,
    provider: Arc<dyn LocationProvider>,
    state: TrackerState,
    // Bumped on every start and stop; events tagged with an older value
    // belong to a cancelled subscription.
    generation: u64,
    notice: Option<String>,
}

pub struct Tracker {
    shared: Arc<Mutex<Shared>>,
}

impl Tracker {
    pub fn new(
        session: SessionInfo,
        sink: Arc<dyn TelemetrySink>,
        mode: TrackingMode,
    ) -> Result<Self, TrackerError> {
        Self::with_options(
            session,
            sink,
            mode,
            TrackerConfig::default(),
            Arc::new(MonotonicClock::new()),
        )
    }

    pub fn with_options(
        session: SessionInfo,
        sink: Arc<dyn TelemetrySink>,
        mode: TrackingMode,
        config: TrackerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TrackerError> {
        let provider: Arc<dyn LocationProvider> = match mode {
            TrackingMode::Live(provider) => provider,
            TrackingMode::Simulated(simulation) => {
                Arc::new(SimulatedProvider::new(simulation, Arc::clone(&clock)))
            }
        };
        if !provider.is_supported() {
            return Err(TrackerError::LocationUnsupported);
        }

        Ok(Self {
            shared: Arc::new(Mutex::new(Shared {
                session,
                config,
                sink,
                clock,
                provider,
                state: TrackerState::Idle { finished: None },
                generation: 0,
                notice: None,
            })),
        })
    }

    /// Begins a fresh run. A no-op while a run is active.
    pub fn start(&self) -> Result<(), TrackerError> {
        let mut shared = self.lock();
        if matches!(shared.state, TrackerState::Tracking { .. }) {
            warn!(session_id = %shared.session.session_id, "start ignored, already tracking");
            return Ok(());
        }
        if !shared.provider.is_supported() {
            return Err(TrackerError::LocationUnsupported);
        }

        shared.generation += 1;
        shared.notice = None;
        let generation = shared.generation;
        let run = ActiveRun::new(shared.clock.now_ms(), shared.config.emit_interval_ms);

        let weak = Arc::downgrade(&self.shared);
        let on_event: EventCallback = Box::new(move |event| {
            if let Some(shared) = weak.upgrade() {
                shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .handle_event(generation, event);
            }
        });
        let watch = shared.provider.start_watching(shared.config.watch, on_event);
        shared.state = TrackerState::Tracking { run, watch };

        info!(
            session_id = %shared.session.session_id,
            user_id = %shared.session.user_id,
            "tracking started"
        );
        Ok(())
    }

    /// Ends the active run and returns its totals. A no-op while idle.
    pub fn stop(&self) -> Option<FinishedRun> {
        // Fixes the provider already accepted belong to this run. The
        // callback takes the lock itself, so flush before locking.
        let provider = Arc::clone(&self.lock().provider);
        provider.flush();

        let mut shared = self.lock();
        if !matches!(shared.state, TrackerState::Tracking { .. }) {
            warn!(session_id = %shared.session.session_id, "stop ignored, not tracking");
            return None;
        }
        let finished = shared.finish();
        if let Some(run) = &finished {
            info!(
                session_id = %shared.session.session_id,
                distance_km = round3(run.total_distance_km),
                running_time_sec = run.running_time_sec,
                "tracking stopped"
            );
        }
        finished
    }

    pub fn status(&self) -> TrackerStatus {
        let shared = self.lock();
        match &shared.state {
            TrackerState::Tracking { run, .. } => TrackerStatus {
                is_tracking: true,
                total_distance: run.total_distance_km(),
                running_time: run.running_time_sec(shared.clock.now_ms()),
            },
            TrackerState::Idle {
                finished: Some(finished),
            } => TrackerStatus {
                is_tracking: false,
                total_distance: finished.total_distance_km,
                running_time: finished.running_time_sec,
            },
            TrackerState::Idle { finished: None } => TrackerStatus {
                is_tracking: false,
                total_distance: 0.0,
                running_time: 0,
            },
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.lock().state, TrackerState::Tracking { .. })
    }

    /// Message to surface to the user, if tracking ended abnormally.
    pub fn notice(&self) -> Option<String> {
        self.lock().notice.clone()
    }

    pub fn session(&self) -> SessionInfo {
        self.lock().session.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Shared {
    fn handle_event(&mut self, generation: u64, event: LocationEvent) {
        if generation != self.generation {
            return;
        }
        match event {
            LocationEvent::Fix(fix) => self.process_fix(fix),
            LocationEvent::Error(LocationError::PermissionDenied) => {
                warn!(session_id = %self.session.session_id, "location permission denied, tracking stopped");
                self.notice = Some(PERMISSION_DENIED_NOTICE.to_string());
                self.finish();
            }
            LocationEvent::Error(err) => {
                warn!(session_id = %self.session.session_id, "location update failed: {err}");
            }
        }
    }

    fn process_fix(&mut self, fix: PositionFix) {
        let now = self.clock.now_ms();
        let TrackerState::Tracking { run, .. } = &mut self.state else {
            return;
        };

        let outcome = run.ingest(&fix, &self.config);
        match outcome {
            FixOutcome::LowAccuracy { accuracy } => {
                warn!(accuracy, limit = self.config.max_accuracy_m, "low accuracy fix ignored");
            }
            FixOutcome::Jump { step_km } => {
                warn!(step_km, "GPS jump detected, step not counted");
            }
            FixOutcome::Accepted { step_km } => {
                debug!(step_km, total_km = run.total_distance_km(), "step accepted");
            }
            FixOutcome::Anchored => {
                debug!(latitude = fix.latitude, longitude = fix.longitude, "first fix anchored");
            }
        }

        if outcome.is_processed() && run.should_emit(now) {
            let frame = TelemetryFrame {
                session_id: self.session.session_id.clone(),
                user_id: self.session.user_id.clone(),
                latitude: fix.latitude,
                longitude: fix.longitude,
                accuracy: fix.accuracy,
                timestamp: fix.timestamp,
                total_distance: round3(run.total_distance_km()),
                running_time: run.running_time_sec(now),
                speed: fix.speed.unwrap_or(0.0),
            };
            self.sink.publish(&self.session.destination(), &frame);
        }
    }

    fn finish(&mut self) -> Option<FinishedRun> {
        let now = self.clock.now_ms();
        match std::mem::replace(&mut self.state, TrackerState::Idle { finished: None }) {
            TrackerState::Tracking { run, watch } => {
                self.generation += 1;
                self.provider.stop_watching(watch);
                let finished = FinishedRun {
                    started_at_ms: run.start_time_ms(),
                    total_distance_km: run.total_distance_km(),
                    running_time_sec: run.running_time_sec(now),
                };
                self.state = TrackerState::Idle {
                    finished: Some(finished),
                };
                Some(finished)
            }
            idle => {
                self.state = idle;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const START_MS: i64 = 1_700_000_000_000;
    const LAT: f64 = 37.5665;
    const LON: f64 = 126.978;
    // ~55.6 m of latitude
    const STEP: f64 = 0.0005;

    #[derive(Default)]
    struct RecordingSink {
        frames: Mutex<Vec<(String, TelemetryFrame)>>,
    }

    impl RecordingSink {
        fn frames(&self) -> Vec<(String, TelemetryFrame)> {
            self.frames.lock().unwrap().clone()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn publish(&self, destination: &str, frame: &TelemetryFrame) {
            self.frames
                .lock()
                .unwrap()
                .push((destination.to_string(), frame.clone()));
        }
    }

    /// Provider driven by hand from the test body.
    struct ManualProvider {
        supported: bool,
        callbacks: Mutex<Vec<EventCallback>>,
        started: AtomicUsize,
        active: Arc<AtomicUsize>,
    }

    impl ManualProvider {
        fn new(supported: bool) -> Arc<Self> {
            Arc::new(Self {
                supported,
                callbacks: Mutex::new(Vec::new()),
                started: AtomicUsize::new(0),
                active: Arc::new(AtomicUsize::new(0)),
            })
        }

        fn emit(&self, event: LocationEvent) {
            let mut callbacks = self.callbacks.lock().unwrap();
            let callback = callbacks.last_mut().expect("nobody is watching");
            callback(event);
        }

        fn emit_to_first(&self, event: LocationEvent) {
            let mut callbacks = self.callbacks.lock().unwrap();
            let callback = &mut callbacks[0];
            callback(event);
        }

        fn fix(&self, latitude: f64, accuracy: f64) {
            self.emit(LocationEvent::Fix(PositionFix::new(latitude, LON, accuracy, START_MS)));
        }
    }

    impl LocationProvider for ManualProvider {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn start_watching(&self, _options: WatchOptions, on_event: EventCallback) -> WatchHandle {
            self.callbacks.lock().unwrap().push(on_event);
            self.started.fetch_add(1, Ordering::SeqCst);
            self.active.fetch_add(1, Ordering::SeqCst);
            let active = Arc::clone(&self.active);
            WatchHandle::new(move || {
                active.fetch_sub(1, Ordering::SeqCst);
            })
        }
    }

    struct Harness {
        tracker: Tracker,
        provider: Arc<ManualProvider>,
        sink: Arc<RecordingSink>,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        let provider = ManualProvider::new(true);
        let sink = Arc::new(RecordingSink::default());
        let clock = Arc::new(ManualClock::new(START_MS));
        let tracker = Tracker::with_options(
            SessionInfo::new("session-1", "user-1"),
            sink.clone(),
            TrackingMode::Live(provider.clone()),
            TrackerConfig::default(),
            clock.clone(),
        )
        .unwrap();
        Harness {
            tracker,
            provider,
            sink,
            clock,
        }
    }

    #[test]
    fn unsupported_platform_fails_fast() {
        let result = Tracker::new(
            SessionInfo::new("s", "u"),
            Arc::new(RecordingSink::default()),
            TrackingMode::Live(ManualProvider::new(false)),
        );
        assert_eq!(result.err(), Some(TrackerError::LocationUnsupported));
    }

    #[test]
    fn idle_status_is_zeroed() {
        let h = harness();
        assert_eq!(
            h.tracker.status(),
            TrackerStatus {
                is_tracking: false,
                total_distance: 0.0,
                running_time: 0,
            }
        );
    }

    #[test]
    fn start_twice_keeps_one_subscription_and_distance() {
        let h = harness();
        h.tracker.start().unwrap();
        h.provider.fix(LAT, 5.0);
        h.provider.fix(LAT + STEP, 5.0);
        let distance = h.tracker.status().total_distance;
        assert!(distance > 0.05);

        h.tracker.start().unwrap();

        assert_eq!(h.provider.started.load(Ordering::SeqCst), 1);
        assert_eq!(h.provider.active.load(Ordering::SeqCst), 1);
        assert_eq!(h.tracker.status().total_distance, distance);
    }

    #[test]
    fn stop_twice_is_harmless() {
        let h = harness();
        h.tracker.start().unwrap();
        assert!(h.tracker.stop().is_some());
        assert!(h.tracker.stop().is_none());
        assert!(!h.tracker.is_tracking());
        assert_eq!(h.provider.active.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn stop_while_idle_is_harmless() {
        let h = harness();
        assert!(h.tracker.stop().is_none());
        assert!(!h.tracker.is_tracking());
    }

    #[test]
    fn low_accuracy_fix_is_not_processed() {
        let h = harness();
        h.tracker.start().unwrap();
        h.provider.fix(LAT, 35.0);
        assert!(h.sink.frames().is_empty());

        h.provider.fix(LAT, 5.0);
        h.clock.advance(1_000);
        h.provider.fix(LAT + STEP, 50.0);
        assert_eq!(h.sink.frames().len(), 1);
        assert_eq!(h.tracker.status().total_distance, 0.0);
    }

    #[test]
    fn burst_of_fixes_emits_once() {
        let h = harness();
        h.tracker.start().unwrap();
        for i in 0..5i32 {
            h.provider.fix(LAT + f64::from(i) * 0.0001, 5.0);
            h.clock.advance(100);
        }
        assert_eq!(h.sink.frames().len(), 1);
        // State still moved even though nothing went out.
        assert!(h.tracker.status().total_distance > 0.04);
    }

    #[test]
    fn frames_follow_the_interval() {
        let h = harness();
        h.tracker.start().unwrap();
        for i in 0..4i32 {
            h.provider.fix(LAT + f64::from(i) * STEP, 5.0);
            h.clock.advance(1_000);
        }
        assert_eq!(h.sink.frames().len(), 4);
    }

    #[test]
    fn frame_carries_rounded_totals() {
        let h = harness();
        h.tracker.start().unwrap();
        h.provider.fix(LAT, 5.0);
        h.clock.advance(2_400);
        h.provider.emit(LocationEvent::Fix(
            PositionFix::new(LAT + STEP, LON, 7.5, START_MS + 2_400).with_speed(3.2),
        ));

        let frames = h.sink.frames();
        assert_eq!(frames.len(), 2);
        let (destination, first) = &frames[0];
        assert_eq!(destination, "/app/running/session-1/location");
        assert_eq!(first.speed, 0.0);
        assert_eq!(first.total_distance, 0.0);

        let (_, second) = &frames[1];
        assert_eq!(second.session_id, "session-1");
        assert_eq!(second.user_id, "user-1");
        assert_eq!(second.accuracy, 7.5);
        assert_eq!(second.timestamp, START_MS + 2_400);
        assert_eq!(second.running_time, 2);
        assert_eq!(second.speed, 3.2);
        assert_eq!(second.total_distance, round3(h.tracker.status().total_distance));
        assert_eq!(second.total_distance, 0.056);
    }

    #[test]
    fn jump_moves_reference_without_counting() {
        let h = harness();
        h.tracker.start().unwrap();
        h.provider.fix(LAT, 5.0);
        h.provider.fix(LAT + 0.01, 5.0);
        assert_eq!(h.tracker.status().total_distance, 0.0);

        h.provider.fix(LAT + 0.01 + STEP, 5.0);
        let distance = h.tracker.status().total_distance;
        assert!((distance - 0.0556).abs() < 0.001, "got {distance}");
    }

    #[test]
    fn transient_errors_keep_tracking() {
        let h = harness();
        h.tracker.start().unwrap();
        h.provider.emit(LocationEvent::Error(LocationError::Timeout));
        h.provider.emit(LocationEvent::Error(LocationError::PositionUnavailable));
        assert!(h.tracker.is_tracking());
        assert!(h.tracker.notice().is_none());
    }

    #[test]
    fn permission_denied_stops_with_notice() {
        let h = harness();
        h.tracker.start().unwrap();
        h.provider.fix(LAT, 5.0);
        h.provider.fix(LAT + STEP, 5.0);
        h.provider.emit(LocationEvent::Error(LocationError::PermissionDenied));

        assert!(!h.tracker.is_tracking());
        assert_eq!(h.provider.active.load(Ordering::SeqCst), 0);
        assert_eq!(h.tracker.notice().as_deref(), Some(PERMISSION_DENIED_NOTICE));
        assert!(h.tracker.status().total_distance > 0.05);

        // Late fixes from the cancelled subscription are ignored.
        let frames = h.sink.frames().len();
        h.clock.advance(5_000);
        h.provider.fix(LAT + 2.0 * STEP, 5.0);
        assert_eq!(h.sink.frames().len(), frames);

        h.tracker.start().unwrap();
        assert!(h.tracker.notice().is_none());
    }

    #[test]
    fn stale_subscription_cannot_touch_new_run() {
        let h = harness();
        h.tracker.start().unwrap();
        h.tracker.stop();
        h.tracker.start().unwrap();

        h.provider
            .emit_to_first(LocationEvent::Fix(PositionFix::new(LAT, LON, 5.0, START_MS)));
        assert!(h.sink.frames().is_empty());
    }

    #[test]
    fn stop_freezes_totals_and_restart_resets() {
        let h = harness();
        h.tracker.start().unwrap();
        h.provider.fix(LAT, 5.0);
        h.provider.fix(LAT + STEP, 5.0);
        h.clock.advance(4_200);

        let finished = h.tracker.stop().unwrap();
        assert_eq!(finished.running_time_sec, 4);
        assert_eq!(finished.started_at_ms, START_MS);

        h.clock.advance(10_000);
        let status = h.tracker.status();
        assert!(!status.is_tracking);
        assert_eq!(status.running_time, 4);
        assert_eq!(status.total_distance, finished.total_distance_km);

        h.tracker.start().unwrap();
        let status = h.tracker.status();
        assert!(status.is_tracking);
        assert_eq!(status.total_distance, 0.0);
        assert_eq!(status.running_time, 0);

        // Fresh run: first fix anchors again and emits immediately.
        h.provider.fix(LAT + 0.02, 5.0);
        assert_eq!(h.tracker.status().total_distance, 0.0);
        assert_eq!(h.sink.frames().last().unwrap().1.total_distance, 0.0);
    }

    #[test]
    fn separate_trackers_do_not_share_state() {
        let a = harness();
        let b = harness();
        a.tracker.start().unwrap();
        b.tracker.start().unwrap();
        a.provider.fix(LAT, 5.0);
        a.provider.fix(LAT + STEP, 5.0);
        assert!(a.tracker.status().total_distance > 0.0);
        assert_eq!(b.tracker.status().total_distance, 0.0);
    }

    fn simulated_tracker(sink: Arc<RecordingSink>, speed_mps: f64) -> Tracker {
        let simulation = SimulationConfig {
            speed_mps,
            ..SimulationConfig::default()
        };
        Tracker::new(
            SessionInfo::new("sim-1", "runner"),
            sink,
            TrackingMode::Simulated(simulation),
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_run_end_to_end() {
        let sink = Arc::new(RecordingSink::default());
        let tracker = simulated_tracker(sink.clone(), 100.0);
        tracker.start().unwrap();

        tokio::time::sleep(Duration::from_millis(3_500)).await;

        let status = tracker.status();
        assert!(status.is_tracking);
        assert_eq!(status.running_time, 3);
        assert!((status.total_distance - 0.3).abs() < 0.001, "got {}", status.total_distance);

        let finished = tracker.stop().unwrap();
        let status = tracker.status();
        assert!(!status.is_tracking);
        assert_eq!(status.total_distance, finished.total_distance_km);
        assert!((status.total_distance - 0.3).abs() < 0.001);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(tracker.status().total_distance, finished.total_distance_km);
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_distance_scales_with_ticks() {
        let sink = Arc::new(RecordingSink::default());
        let tracker = simulated_tracker(sink.clone(), 50.0);
        tracker.start().unwrap();

        let ticks = 10;
        tokio::time::sleep(Duration::from_millis(ticks * 1_000 + 500)).await;
        tracker.stop();

        let expected = ticks as f64 * 0.05;
        let distance = tracker.status().total_distance;
        assert!((distance - expected).abs() < expected * 0.005, "got {distance}");

        let frames = sink.frames().len() as u64;
        assert!((ticks..=ticks + 1).contains(&frames), "got {frames} frames");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_keeps_fixes_pushed_just_before_it() {
        let provider = Arc::new(LiveProvider::new());
        let sink = Arc::new(RecordingSink::default());
        let tracker = Tracker::new(
            SessionInfo::new("live-2", "runner"),
            sink.clone(),
            TrackingMode::Live(provider.clone()),
        )
        .unwrap();
        tracker.start().unwrap();

        assert!(provider.push(LocationEvent::Fix(PositionFix::new(LAT, LON, 5.0, 0))));
        assert!(provider.push(LocationEvent::Fix(PositionFix::new(LAT + STEP, LON, 5.0, 1))));
        let finished = tracker.stop().unwrap();

        assert!(
            (finished.total_distance_km - 0.0556).abs() < 0.001,
            "got {}",
            finished.total_distance_km
        );
        assert_eq!(sink.frames().len(), 1);
        assert!(!provider.push(LocationEvent::Fix(PositionFix::new(LAT, LON, 5.0, 2))));
    }

    #[tokio::test(start_paused = true)]
    async fn live_provider_feeds_the_tracker() {
        let provider = Arc::new(LiveProvider::new());
        let sink = Arc::new(RecordingSink::default());
        let tracker = Tracker::new(
            SessionInfo::new("live-1", "runner"),
            sink.clone(),
            TrackingMode::Live(provider.clone()),
        )
        .unwrap();
        tracker.start().unwrap();

        assert!(provider.push(LocationEvent::Fix(PositionFix::new(LAT, LON, 5.0, 0))));
        assert!(provider.push(LocationEvent::Fix(PositionFix::new(LAT + STEP, LON, 5.0, 1))));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(tracker.status().total_distance > 0.05);

        // Silence only produces timeout warnings.
        tokio::time::sleep(Duration::from_secs(12)).await;
        assert!(tracker.is_tracking());

        assert!(provider.push(LocationEvent::Error(LocationError::PermissionDenied)));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!tracker.is_tracking());
        assert!(!provider.is_watching());
        assert!(tracker.notice().is_some());
    }
}
