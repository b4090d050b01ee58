use crate::{agents::StatusReport, types::Capability, AppState};
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AgentInfo {
    pub capability: Capability,
    pub description: &'static str,
    pub model: String,
}

pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentInfo>> {
    let models = state.orchestrator.registry().agent_models();
    Json(
        models
            .into_iter()
            .map(|(capability, model)| AgentInfo {
                capability,
                description: capability.description(),
                model,
            })
            .collect(),
    )
}

pub async fn status(State(state): State<AppState>) -> Json<StatusReport> {
    Json(state.orchestrator.status())
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
