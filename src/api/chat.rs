use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, AppState, ChatRequest, ChatResponse};

/// `POST /api/chat`
///
/// Feeds one message through the chat dispatcher. Messages the bot ignores
/// come back with a `null` reply.
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ApiResponse<ChatResponse>> {
    let reply = state.bot().handle_message(&request.message).await;
    Json(ApiResponse::success(ChatResponse { reply }))
}
