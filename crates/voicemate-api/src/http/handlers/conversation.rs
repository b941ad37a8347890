//! Conversation endpoints.
//!
//! GET  /history - The most recent exchanges, oldest first.
//! POST /process - Generate, store and return a reply.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use voicemate_core::chat::service::DEFAULT_HISTORY_LIMIT;
use voicemate_types::conversation::ConversationRecord;
use voicemate_types::error::ChatError;

use crate::http::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ConversationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub reply: String,
}

/// GET /history - Never fails; a broken store yields an empty list.
pub async fn history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let messages = state.service.recent_history(DEFAULT_HISTORY_LIMIT).await;
    Json(HistoryResponse { messages })
}

/// POST /process - Body `{"text": "..."}`.
///
/// The raw body is parsed by hand: a missing or non-JSON body, a missing
/// `text` field and a non-string `text` are all the same client error.
pub async fn process(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, AppError> {
    let text = serde_json::from_slice::<ProcessRequest>(&body)
        .ok()
        .and_then(|req| req.text)
        .ok_or(ChatError::EmptyInput)?;

    let reply = state.service.process(&text).await?;
    Ok(Json(ProcessResponse { reply }))
}
