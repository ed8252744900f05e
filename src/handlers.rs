use crate::errors::AppError;
use crate::models::{
    LocationErrorRequest, RunRecord, SessionResponse, StartSessionRequest, StatsResponse,
    StatusResponse,
};
use crate::state::{evict_idle, AppState, Session};
use crate::stats::build_stats;
use crate::storage::persist_data;
use crate::tracker::geo::round3;
use crate::tracker::{FinishedRun, LocationEvent, PositionFix, SessionInfo, TelemetryFrame};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::{debug, info};

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data)))
}

pub async fn start_session(
    State(state): State<AppState>,
    Json(payload): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let user_id = payload.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::bad_request("user_id must not be empty"));
    }

    let session_id = match payload.session_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => state.next_session_id(),
    };
    let mode = payload.mode.unwrap_or(state.config.default_mode);

    let mut sessions = state.sessions.lock().await;
    if sessions.contains_key(&session_id) {
        return Err(AppError::conflict(format!(
            "session '{session_id}' already exists"
        )));
    }

    let info = SessionInfo::new(session_id.clone(), user_id);
    let session = Session::open(info, mode, &state.config, Arc::clone(&state.telemetry))?;
    session.tracker.start()?;
    info!(%session_id, mode = mode.as_str(), "session opened");

    let response = session_response(&state, &session);
    sessions.insert(session_id, Arc::new(session));
    let evicted = evict_idle(&mut sessions, state.config.max_idle_sessions);
    if !evicted.is_empty() {
        debug!(?evicted, "idle sessions evicted");
    }
    Ok(Json(response))
}

pub async fn get_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let session = find_session(&state, &session_id).await?;
    Ok(Json(status_response(&session)))
}

pub async fn resume_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let session = find_session(&state, &session_id).await?;
    session.tracker.start()?;
    Ok(Json(status_response(&session)))
}

pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let session = find_session(&state, &session_id).await?;
    if let Some(finished) = session.tracker.stop() {
        record_run(&state, &session, finished).await?;
    }
    Ok(Json(status_response(&session)))
}

/// Stops the session if it is still tracking, records the run and forgets
/// the session.
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let session = state
        .sessions
        .lock()
        .await
        .remove(&session_id)
        .ok_or_else(|| AppError::not_found(format!("unknown session '{session_id}'")))?;
    if session.tracker.is_tracking() {
        if let Some(finished) = session.tracker.stop() {
            record_run(&state, &session, finished).await?;
        }
    }
    info!(%session_id, "session closed");
    Ok(Json(status_response(&session)))
}

pub async fn push_fix(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(fix): Json<PositionFix>,
) -> Result<StatusCode, AppError> {
    validate_fix(&fix)?;
    let session = find_session(&state, &session_id).await?;
    deliver(&session, LocationEvent::Fix(fix))
}

pub async fn push_location_error(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(payload): Json<LocationErrorRequest>,
) -> Result<StatusCode, AppError> {
    let session = find_session(&state, &session_id).await?;
    deliver(&session, LocationEvent::Error(payload.code))
}

pub async fn get_telemetry(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<TelemetryFrame>, AppError> {
    let session = find_session(&state, &session_id).await?;
    let destination = session.tracker.session().destination();
    state
        .telemetry
        .latest(&destination)
        .map(Json)
        .ok_or_else(|| AppError::not_found("no telemetry published yet"))
}

async fn find_session(state: &AppState, session_id: &str) -> Result<Arc<Session>, AppError> {
    let sessions = state.sessions.lock().await;
    sessions
        .get(session_id)
        .cloned()
        .ok_or_else(|| AppError::not_found(format!("unknown session '{session_id}'")))
}

fn deliver(session: &Session, event: LocationEvent) -> Result<StatusCode, AppError> {
    let Some(live) = session.live.as_ref() else {
        return Err(AppError::bad_request(
            "session is simulated and does not accept device updates",
        ));
    };
    if !live.push(event) {
        return Err(AppError::conflict("session is not tracking"));
    }
    Ok(StatusCode::ACCEPTED)
}

fn validate_fix(fix: &PositionFix) -> Result<(), AppError> {
    if !fix.latitude.is_finite() || !(-90.0..=90.0).contains(&fix.latitude) {
        return Err(AppError::bad_request("latitude must be within -90..=90"));
    }
    if !fix.longitude.is_finite() || !(-180.0..=180.0).contains(&fix.longitude) {
        return Err(AppError::bad_request("longitude must be within -180..=180"));
    }
    if !fix.accuracy.is_finite() || fix.accuracy < 0.0 {
        return Err(AppError::bad_request("accuracy must be a non-negative number"));
    }
    if fix.speed.is_some_and(|speed| !speed.is_finite()) {
        return Err(AppError::bad_request("speed must be a number"));
    }
    Ok(())
}

async fn record_run(
    state: &AppState,
    session: &Session,
    finished: FinishedRun,
) -> Result<(), AppError> {
    let info = session.tracker.session();
    let date = DateTime::from_timestamp_millis(finished.started_at_ms)
        .map(|started| started.with_timezone(&Local).date_naive())
        .unwrap_or_else(|| Local::now().date_naive());

    let mut data = state.data.lock().await;
    data.runs.push(RunRecord {
        session_id: info.session_id,
        user_id: info.user_id,
        date: date.to_string(),
        started_at_ms: finished.started_at_ms,
        distance_km: round3(finished.total_distance_km),
        running_time_sec: finished.running_time_sec,
    });
    persist_data(&state.data_path, &data).await
}

fn status_response(session: &Session) -> StatusResponse {
    let status = session.tracker.status();
    StatusResponse {
        session_id: session.tracker.session().session_id,
        is_tracking: status.is_tracking,
        total_distance: status.total_distance,
        running_time: status.running_time,
        notice: session.tracker.notice(),
    }
}

fn session_response(state: &AppState, session: &Session) -> SessionResponse {
    let info = session.tracker.session();
    SessionResponse {
        destination: info.destination(),
        session_id: info.session_id,
        user_id: info.user_id,
        mode: session.mode,
        watch: state.config.tracker.watch.into(),
        status: status_response(session),
    }
}
