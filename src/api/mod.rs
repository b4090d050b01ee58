//! HTTP API Handlers and Routes
//!
//! A thin JSON layer over the orchestrator, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! - `GET /api/health` - Health check endpoint
//! - `POST /api/process` - Process `{message, agents?}` through the pipeline
//! - `GET /api/status` - Registered agents, model bindings, conversation count
//! - `GET /api/history?limit=N` - Most recent conversations, oldest first
//! - `GET /api/history/{id}` - One conversation by id
//! - `GET /api/agents` - Capabilities with descriptions and model aliases

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
