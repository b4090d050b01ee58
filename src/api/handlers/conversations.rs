//! Conversation history handlers.

use crate::{
    memory::ConversationEntry,
    types::{AppError, Result},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Number of most recent entries (defaults to `orchestrator.history_limit`)
    pub limit: Option<usize>,
}

/// Most recent conversations, oldest first.
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<ConversationEntry>> {
    let limit = query
        .limit
        .unwrap_or(state.config.orchestrator.history_limit);
    Json(state.orchestrator.history(limit))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ConversationEntry>> {
    state
        .orchestrator
        .conversation(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Conversation {} not found", id)))
}
