use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Telemetry frame published while tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryFrame {
    pub session_id: String,
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub timestamp: i64,
    /// Kilometres, rounded to three decimals.
    pub total_distance: f64,
    /// Whole seconds.
    pub running_time: u64,
    /// Metres per second.
    pub speed: f64,
}

/// Publish-capable channel. Fire-and-forget: delivery failures stay inside
/// the implementation.
pub trait TelemetrySink: Send + Sync {
    fn publish(&self, destination: &str, frame: &TelemetryFrame);
}

/// In-process sink that keeps the latest frame per destination.
#[derive(Debug, Default)]
pub struct TelemetryHub {
    latest: Mutex<HashMap<String, Published>>,
}

#[derive(Debug, Clone)]
struct Published {
    frame: TelemetryFrame,
    count: u64,
}

impl TelemetryHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self, destination: &str) -> Option<TelemetryFrame> {
        let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        latest.get(destination).map(|entry| entry.frame.clone())
    }

    pub fn published_count(&self, destination: &str) -> u64 {
        let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        latest.get(destination).map_or(0, |entry| entry.count)
    }
}

impl TelemetrySink for TelemetryHub {
    fn publish(&self, destination: &str, frame: &TelemetryFrame) {
        match serde_json::to_string(frame) {
            Ok(payload) => debug!(destination, %payload, "telemetry published"),
            Err(err) => debug!(destination, "telemetry frame not serializable: {err}"),
        }

        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = latest
            .entry(destination.to_string())
            .or_insert_with(|| Published {
                frame: frame.clone(),
                count: 0,
            });
        entry.frame = frame.clone();
        entry.count = entry.count.saturating_add(1);
    }
}
