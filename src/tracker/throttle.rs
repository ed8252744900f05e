/// Caps outbound telemetry to one frame per interval. Nothing is queued: a
/// check that falls inside the window is simply dropped.
#[derive(Debug, Clone)]
pub struct EmissionThrottle {
    interval_ms: i64,
    last_emission_ms: i64,
}

impl EmissionThrottle {
    pub fn new(interval_ms: i64) -> Self {
        Self {
            interval_ms,
            last_emission_ms: 0,
        }
    }

    /// Returns true and records `now_ms` when a frame may go out.
    pub fn try_acquire(&mut self, now_ms: i64) -> bool {
        if now_ms - self.last_emission_ms >= self.interval_ms {
            self.last_emission_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn last_emission_ms(&self) -> i64 {
        self.last_emission_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_check_always_passes() {
        let mut throttle = EmissionThrottle::new(1_000);
        assert!(throttle.try_acquire(1_700_000_000_000));
        assert_eq!(throttle.last_emission_ms(), 1_700_000_000_000);
    }

    #[test]
    fn burst_inside_window_emits_once() {
        let mut throttle = EmissionThrottle::new(1_000);
        let now = 10_000;
        let emitted = (0..5)
            .filter(|i| throttle.try_acquire(now + i * 100))
            .count();
        assert_eq!(emitted, 1);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let mut throttle = EmissionThrottle::new(1_000);
        assert!(throttle.try_acquire(5_000));
        assert!(!throttle.try_acquire(5_999));
        assert!(throttle.try_acquire(6_000));
    }
}
