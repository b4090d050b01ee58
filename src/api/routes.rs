use crate::api::handlers::{agents, chat, conversations};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(agents::health))
        .route("/status", get(agents::status))
        .route("/agents", get(agents::list_agents))
        .route("/process", post(chat::process))
        .route("/history", get(conversations::history))
        .route("/history/{id}", get(conversations::get_conversation))
}

/// Full application: API routes under `/api` with tracing and CORS layers.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", create_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
