use crate::config::ModeKind;
use crate::tracker::{LocationError, WatchOptions};
use serde::{Deserialize, Serialize};

/// Summary of a stopped run, as persisted in the history file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunRecord {
    pub session_id: String,
    pub user_id: String,
    /// Local calendar day the run started, `YYYY-MM-DD`.
    pub date: String,
    pub started_at_ms: i64,
    pub distance_km: f64,
    pub running_time_sec: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub runs: Vec<RunRecord>,
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub user_id: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub mode: Option<ModeKind>,
}

#[derive(Debug, Deserialize)]
pub struct LocationErrorRequest {
    pub code: LocationError,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WatchOptionsResponse {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl From<WatchOptions> for WatchOptionsResponse {
    fn from(options: WatchOptions) -> Self {
        Self {
            enable_high_accuracy: options.enable_high_accuracy,
            timeout_ms: options.timeout.as_millis() as u64,
            maximum_age_ms: options.maximum_age.as_millis() as u64,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session_id: String,
    pub is_tracking: bool,
    /// Kilometres.
    pub total_distance: f64,
    /// Whole seconds.
    pub running_time: u64,
    pub notice: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub user_id: String,
    pub mode: ModeKind,
    pub destination: String,
    pub watch: WatchOptionsResponse,
    pub status: StatusResponse,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub runs: u32,
    pub distance_km: f64,
    pub running_time_sec: u64,
}

#[derive(Debug, Serialize)]
pub struct WeeklyPoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub runs: u32,
    pub distance_km: f64,
    pub running_time_sec: u64,
}

#[derive(Debug, Serialize)]
pub struct WeeklyAveragePoint {
    pub week: String,
    pub days_counted: u8,
    pub avg_distance_km: f64,
    pub avg_running_time_sec: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_runs: usize,
    pub total_distance_km: f64,
    pub last_7_days: Vec<DailyPoint>,
    pub weekly_totals: Vec<WeeklyPoint>,
    pub weekly_averages: Vec<WeeklyAveragePoint>,
}
