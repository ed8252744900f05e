use serde::{Deserialize, Serialize};
use std::fmt;

/// A single reported device position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy radius in metres.
    pub accuracy: f64,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Metres per second, when the device reports it.
    #[serde(default)]
    pub speed: Option<f64>,
}

impl PositionFix {
    pub fn new(latitude: f64, longitude: f64, accuracy: f64, timestamp: i64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            timestamp,
            speed: None,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "location permission denied"),
            LocationError::PositionUnavailable => write!(f, "position unavailable"),
            LocationError::Timeout => write!(f, "timed out waiting for a position"),
        }
    }
}

impl std::error::Error for LocationError {}

/// What a provider delivers to its subscriber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationEvent {
    Fix(PositionFix),
    Error(LocationError),
}
