use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, LookupQuery};
use crate::models::anime::{AnimeRecord, NewAnime};
use crate::services::LookupRequest;
use crate::services::projector::{render_full, requestable_fields};

/// `GET /api/anime/{id}` renders every column as plain text.
pub async fn get_anime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<String, ApiError> {
    let record = state.lookup().get_by_id(id).await?;
    Ok(render_full(&record))
}

pub async fn create_anime(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAnime>,
) -> Result<Json<ApiResponse<AnimeRecord>>, ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("Title must not be empty"));
    }

    let record = state.lookup().create(payload).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// `GET /api/anime/lookup?q=...&fields=a,b`
pub async fn lookup_anime(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> Result<String, ApiError> {
    let fields = query
        .fields
        .as_deref()
        .map(LookupRequest::parse_field_list)
        .unwrap_or_default();

    let request = LookupRequest::new(query.q, fields);
    Ok(state.lookup().lookup(&request).await?)
}

pub async fn list_fields() -> Json<ApiResponse<Vec<&'static str>>> {
    Json(ApiResponse::success(requestable_fields().collect()))
}
