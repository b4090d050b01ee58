use crate::{
    types::{AppError, ProcessRequest, ProcessResponse, Result},
    AppState,
};
use axum::{extract::State, Json};

/// Run one request through the pipeline.
///
/// A whole-run failure still answers 200; the body carries `status: "failed"`
/// and the error.
pub async fn process(
    State(state): State<AppState>,
    Json(payload): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>> {
    if payload.message.trim().is_empty() {
        return Err(AppError::InvalidInput("Message cannot be empty".to_string()));
    }

    let response = state
        .orchestrator
        .process_request(&payload.message, payload.agents)
        .await;

    Ok(Json(response))
}
