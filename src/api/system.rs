use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

use super::{ApiResponse, AppState, HealthResponse};

/// `GET /`
pub async fn root() -> impl IntoResponse {
    Json(json!({ "Hello": "World" }))
}

/// `GET /api/health`
///
/// Readiness probe; answers 503 while the store does not respond.
pub async fn health_ready(State(state): State<Arc<AppState>>) -> Response {
    let db_ready = state.store().ping().await.is_ok();

    let status = if db_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(HealthResponse {
            ready: db_ready,
            database: db_ready,
        })),
    )
        .into_response()
}
