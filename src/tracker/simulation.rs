use crate::tracker::clock::Clock;
use crate::tracker::fix::{LocationEvent, PositionFix};
use crate::tracker::provider::{EventCallback, LocationProvider, WatchHandle, WatchOptions};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

/// Approximate metres per degree of latitude.
const METERS_PER_DEGREE: f64 = 111_320.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    /// Metres per second. Deliberately fast by default so a test run covers
    /// distance quickly.
    pub speed_mps: f64,
    pub accuracy: f64,
    pub tick: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            origin_latitude: 37.5665,
            origin_longitude: 126.9780,
            speed_mps: 100.0,
            accuracy: 10.0,
            tick: Duration::from_secs(1),
        }
    }
}

/// Deterministic northbound course.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn degrees_per_tick(&self) -> f64 {
        self.config.speed_mps * self.config.tick.as_secs_f64() / METERS_PER_DEGREE
    }

    pub fn fix_at(&self, tick: u64, timestamp: i64) -> PositionFix {
        let latitude = self.config.origin_latitude + tick as f64 * self.degrees_per_tick();
        PositionFix::new(
            latitude,
            self.config.origin_longitude,
            self.config.accuracy,
            timestamp,
        )
        .with_speed(self.config.speed_mps)
    }
}

/// Drop-in replacement for a live source, ticking on a fixed interval.
pub struct SimulatedProvider {
    simulator: Simulator,
    clock: Arc<dyn Clock>,
}

impl SimulatedProvider {
    pub fn new(config: SimulationConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            simulator: Simulator::new(config),
            clock,
        }
    }
}

impl LocationProvider for SimulatedProvider {
    fn start_watching(&self, _options: WatchOptions, mut on_event: EventCallback) -> WatchHandle {
        let simulator = self.simulator.clone();
        let clock = Arc::clone(&self.clock);
        let task = tokio::spawn(async move {
            let mut ticker = interval(simulator.config.tick);
            let mut tick = 0u64;
            loop {
                ticker.tick().await;
                on_event(LocationEvent::Fix(simulator.fix_at(tick, clock.now_ms())));
                tick += 1;
            }
        });
        WatchHandle::from_task(task)
    }
}
