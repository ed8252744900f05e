use crate::tracker::fix::PositionFix;
use crate::tracker::geo::haversine_km;
use crate::tracker::throttle::EmissionThrottle;
use crate::tracker::TrackerConfig;

/// How a single fix was handled by the filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixOutcome {
    /// Accuracy worse than the limit; nothing changed.
    LowAccuracy { accuracy: f64 },
    /// First usable fix of the run; becomes the reference point.
    Anchored,
    Accepted { step_km: f64 },
    /// Step too long to be real movement. Not counted, but the fix is the
    /// new reference point.
    Jump { step_km: f64 },
}

impl FixOutcome {
    /// Whether the fix passed the accuracy gate.
    pub fn is_processed(&self) -> bool {
        !matches!(self, FixOutcome::LowAccuracy { .. })
    }
}

/// Accumulator state for one tracking run. Built fresh by every start.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    start_time_ms: i64,
    total_distance_km: f64,
    last_fix: Option<PositionFix>,
    throttle: EmissionThrottle,
}

impl ActiveRun {
    pub fn new(start_time_ms: i64, emit_interval_ms: i64) -> Self {
        Self {
            start_time_ms,
            total_distance_km: 0.0,
            last_fix: None,
            throttle: EmissionThrottle::new(emit_interval_ms),
        }
    }

    pub fn ingest(&mut self, fix: &PositionFix, config: &TrackerConfig) -> FixOutcome {
        if fix.accuracy > config.max_accuracy_m {
            return FixOutcome::LowAccuracy {
                accuracy: fix.accuracy,
            };
        }

        let outcome = match self.last_fix {
            None => FixOutcome::Anchored,
            Some(last) => {
                let step_km =
                    haversine_km(last.latitude, last.longitude, fix.latitude, fix.longitude);
                if !step_km.is_finite() || step_km >= config.max_step_km {
                    FixOutcome::Jump { step_km }
                } else {
                    self.total_distance_km += step_km;
                    FixOutcome::Accepted { step_km }
                }
            }
        };

        self.last_fix = Some(*fix);
        outcome
    }

    pub fn should_emit(&mut self, now_ms: i64) -> bool {
        self.throttle.try_acquire(now_ms)
    }

    pub fn start_time_ms(&self) -> i64 {
        self.start_time_ms
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn last_fix(&self) -> Option<&PositionFix> {
        self.last_fix.as_ref()
    }

    pub fn running_time_sec(&self, now_ms: i64) -> u64 {
        ((now_ms - self.start_time_ms).max(0) / 1000) as u64
    }
}
