//! Provider Registry for resolving model aliases
//!
//! Model aliases (`phi3`, `mistral`, ...) are declared under `[models]` and
//! each references a named provider under `[providers]`. The registry walks
//! that chain and produces ready-to-use [`Provider`] values or clients.

use crate::llm::client::Provider;
use crate::types::{AppError, Result};
use crate::utils::toml_config::{ModelConfig, ProviderConfig, TriadConfig};
use std::collections::HashMap;

/// Registry for managing named LLM providers and the model aliases bound to them
pub struct ProviderRegistry {
    /// Provider configurations keyed by name
    providers: HashMap<String, ProviderConfig>,
    /// Model configurations keyed by alias
    models: HashMap<String, ModelConfig>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Create a new empty provider registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            models: HashMap::new(),
        }
    }

    /// Create a provider registry from TOML configuration
    pub fn from_config(config: &TriadConfig) -> Self {
        Self {
            providers: config.providers.clone(),
            models: config.models.clone(),
        }
    }

    /// Get a model configuration by alias
    pub fn get_model(&self, alias: &str) -> Option<&ModelConfig> {
        self.models.get(alias)
    }

    /// Get all model aliases, sorted
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Resolve the alias -> provider chain into a concrete [`Provider`]
    pub fn resolve(&self, alias: &str) -> Result<Provider> {
        let model_config = self.get_model(alias).ok_or_else(|| {
            AppError::Configuration(format!("Model '{}' not found in configuration", alias))
        })?;

        let provider_config = self.providers.get(&model_config.provider).ok_or_else(|| {
            AppError::Configuration(format!(
                "Provider '{}' referenced by model '{}' not found",
                model_config.provider, alias
            ))
        })?;

        Provider::from_model_config(model_config, provider_config)
    }
}
