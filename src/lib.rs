//! # Triad - multi-agent request router
//!
//! Routes a free-text request to one or more specialized agents (research,
//! documentation, coding), runs them in a fixed pipeline order with
//! per-agent failure isolation, and keeps an in-memory conversation history.
//!
//! ## Overview
//!
//! Triad can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `triad-server` binary
//! 2. **As a library** - Embed the [`Orchestrator`] in your own Rust project
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use triad::{Orchestrator, TriadConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TriadConfig::load("triad.toml")?;
//!     let orchestrator = Orchestrator::initialize(&config).await?;
//!
//!     let response = orchestrator
//!         .process_request("research and document rust error handling", None)
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&response)?);
//!     Ok(())
//! }
//! ```
//!
//! ### Custom Completion Backend
//!
//! ```rust,ignore
//! use triad::{AgentRegistry, Orchestrator, TriadConfig};
//! use triad::tools::NoopSearch;
//! use std::sync::Arc;
//!
//! let config = TriadConfig::default();
//! let registry = AgentRegistry::from_config(&config, Arc::new(NoopSearch));
//! let orchestrator = Orchestrator::new(registry, Arc::new(MyCompletionService));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ollama` | Ollama local inference (default) |
//! | `openai` | OpenAI API and compatible endpoints |
//! | `all-llm` | Every provider |
//!
//! ## Modules
//!
//! - [`agents`] - Agents, router, pipeline executor and orchestrator
//! - [`api`] - REST API handlers and routes
//! - [`llm`] - LLM client implementations and the completion service
//! - [`memory`] - Conversation store
//! - [`tools`] - Web search
//! - [`types`] - Common types and error handling

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Agents, routing, pipeline execution and orchestration.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Command line parsing and terminal output.
pub mod cli;
/// LLM provider clients and abstractions.
pub mod llm;
/// Conversation history.
pub mod memory;
/// Web search.
pub mod tools;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{AgentRegistry, AgentRegistryBuilder, Orchestrator, PipelineExecutor};
pub use llm::{LLMClient, ModelManager, Provider, ProviderRegistry, TextCompletionService};
pub use memory::{ConversationEntry, ConversationStore};
pub use types::{AppError, Capability, Result};
pub use utils::toml_config::TriadConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<TriadConfig>,
    /// The orchestrator every request goes through
    pub orchestrator: Arc<Orchestrator>,
}
