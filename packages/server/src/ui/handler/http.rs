//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    domain::ScoreBoard,
    infrastructure::{
        dto::http::{RESET_STATUS, StatusDto},
        metrics::CONTENT_TYPE,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<StatusDto> {
    Json(StatusDto::new("ok"))
}

/// Current scoreboard, read-only
pub async fn get_scores(State(state): State<Arc<AppState>>) -> Json<ScoreBoard> {
    Json(state.get_scores().execute().await)
}

/// Clear the scoreboard (test/administrative use, no access control)
pub async fn reset_scores(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusDto>, (StatusCode, Json<StatusDto>)> {
    match state.reset_scores().execute().await {
        Ok(_) => Ok(Json(StatusDto::new(RESET_STATUS))),
        Err(e) => {
            tracing::error!("Reset failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusDto::new("error")),
            ))
        }
    }
}

/// Counters and gauges in the Prometheus text format
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, CONTENT_TYPE)], state.metrics.render())
}
