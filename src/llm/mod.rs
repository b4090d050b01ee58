//! LLM Provider Clients and Abstractions
//!
//! This module provides a unified interface for interacting with the Large
//! Language Model backends the agents run on.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all provider clients implement
//! - [`Provider`] - Runtime provider selection
//! - [`ProviderRegistry`] - Resolves configured model aliases to providers
//! - [`ModelManager`] - Binds aliases to clients at startup and serves
//!   [`TextCompletionService::generate`] for the agents
//!
//! # Supported Providers
//!
//! Enable providers via Cargo features:
//! - `ollama` - Local Ollama server (default)
//! - `openai` - OpenAI API and compatible endpoints

/// Core LLM client trait and provider selection.
pub mod client;
/// Alias bindings and the text-completion service.
pub mod model_manager;
/// Registry resolving model aliases to providers.
pub mod provider_registry;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

pub use client::{LLMClient, Provider};
pub use model_manager::{ModelInfo, ModelManager, TextCompletionService};
pub use provider_registry::ProviderRegistry;
