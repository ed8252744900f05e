use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/sessions", post(handlers::start_session))
        .route("/api/sessions/:session_id", delete(handlers::close_session))
        .route("/api/sessions/:session_id/status", get(handlers::get_status))
        .route("/api/sessions/:session_id/start", post(handlers::resume_session))
        .route("/api/sessions/:session_id/stop", post(handlers::stop_session))
        .route("/api/sessions/:session_id/fixes", post(handlers::push_fix))
        .route(
            "/api/sessions/:session_id/location-errors",
            post(handlers::push_location_error),
        )
        .route("/api/sessions/:session_id/telemetry", get(handlers::get_telemetry))
        .with_state(state)
}
