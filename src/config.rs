use crate::tracker::{SimulationConfig, TrackerConfig};
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf, str::FromStr, time::Duration};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Live,
    Simulated,
}

impl ModeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Live => "live",
            ModeKind::Simulated => "simulated",
        }
    }
}

impl FromStr for ModeKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(ModeKind::Live),
            "simulated" | "simulation" | "test" => Ok(ModeKind::Simulated),
            other => Err(format!("unknown tracking mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub default_mode: ModeKind,
    pub tracker: TrackerConfig,
    pub simulation: SimulationConfig,
    /// Stopped sessions kept around for status reads before the oldest go.
    pub max_idle_sessions: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from("data/runs.json"),
            default_mode: ModeKind::Live,
            tracker: TrackerConfig::default(),
            simulation: SimulationConfig::default(),
            max_idle_sessions: 64,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let default_mode = match lookup("TRACKER_MODE") {
            Some(value) => value.parse().unwrap_or_else(|err| {
                warn!("{err}, falling back to live tracking");
                ModeKind::Live
            }),
            None => defaults.default_mode,
        };

        let mut tracker = defaults.tracker;
        if let Some(value) = lookup("TRACKER_FIX_TIMEOUT_MS") {
            match value.parse::<u64>() {
                Ok(ms) if ms > 0 => tracker.watch.timeout = Duration::from_millis(ms),
                _ => warn!("ignoring invalid TRACKER_FIX_TIMEOUT_MS '{value}'"),
            }
        }

        let mut simulation = defaults.simulation;
        if let Some(value) = lookup("TRACKER_SIM_SPEED_MPS") {
            match value.parse::<f64>() {
                Ok(speed) if speed.is_finite() && speed > 0.0 => simulation.speed_mps = speed,
                _ => warn!("ignoring invalid TRACKER_SIM_SPEED_MPS '{value}'"),
            }
        }

        let max_idle_sessions = match lookup("MAX_IDLE_SESSIONS") {
            Some(value) => value.parse::<usize>().unwrap_or_else(|_| {
                warn!("ignoring invalid MAX_IDLE_SESSIONS '{value}'");
                defaults.max_idle_sessions
            }),
            None => defaults.max_idle_sessions,
        };

        Self {
            port,
            data_path,
            default_mode,
            tracker,
            simulation,
            max_idle_sessions,
        }
    }
}
