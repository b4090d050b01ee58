//! Model bindings and the text-completion boundary the agents call through.
//!
//! [`ModelManager`] binds model aliases to live [`LLMClient`]s at startup.
//! Binding is best-effort: a candidate that cannot be created or fails its
//! health check is logged and skipped, and generation against it later
//! fails with an [`AppError::LLM`].

use crate::llm::client::LLMClient;
use crate::llm::provider_registry::ProviderRegistry;
use crate::types::{AppError, GenerationOptions, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Text completion service: model alias + prompt + options in, text out.
#[async_trait]
pub trait TextCompletionService: Send + Sync {
    /// Generate text with the model bound to `model`
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String>;

    /// Describe every known model alias and whether it is bound
    fn model_info(&self) -> Vec<ModelInfo>;

    /// Number of aliases with a live binding
    fn loaded_count(&self) -> usize {
        self.model_info().iter().filter(|m| m.loaded).count()
    }
}

/// Status of one model alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub alias: String,
    pub provider: String,
    pub model: String,
    pub loaded: bool,
}

struct Binding {
    provider: String,
    client: Arc<dyn LLMClient>,
}

/// Owns the alias -> client bindings established at startup.
pub struct ModelManager {
    registry: ProviderRegistry,
    bindings: HashMap<String, Binding>,
}

impl ModelManager {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry,
            bindings: HashMap::new(),
        }
    }

    /// Try to bind one alias. Returns whether it is now loaded.
    pub async fn load_model(&mut self, alias: &str) -> bool {
        info!("Loading model '{}'", alias);

        let provider = match self.registry.resolve(alias) {
            Ok(provider) => provider,
            Err(e) => {
                error!("Failed to resolve model '{}': {}", alias, e);
                return false;
            }
        };

        let client = match provider.create_client().await {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to create client for model '{}': {}", alias, e);
                return false;
            }
        };

        let verify = self
            .registry
            .get_model(alias)
            .map(|m| m.verify)
            .unwrap_or(true);
        if verify {
            if let Err(e) = client.health_check().await {
                warn!("Model '{}' failed its health check: {}", alias, e);
                return false;
            }
        }

        info!(
            "Successfully loaded model '{}' ({} via {})",
            alias,
            client.model_name(),
            provider.name()
        );
        self.register_client(alias, provider.name(), Arc::from(client));
        true
    }

    /// Bind each candidate in order. Returns how many succeeded.
    pub async fn load_models(&mut self, candidates: &[String]) -> usize {
        let mut loaded = 0;
        for alias in candidates {
            if self.load_model(alias).await {
                loaded += 1;
            } else {
                warn!("Failed to load {}", alias);
            }
        }
        loaded
    }

    /// Bind an alias to an already constructed client.
    pub fn register_client(&mut self, alias: &str, provider: &str, client: Arc<dyn LLMClient>) {
        self.bindings.insert(
            alias.to_string(),
            Binding {
                provider: provider.to_string(),
                client,
            },
        );
    }

    pub fn is_loaded(&self, alias: &str) -> bool {
        self.bindings.contains_key(alias)
    }
}

#[async_trait]
impl TextCompletionService for ModelManager {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        let binding = self
            .bindings
            .get(model)
            .ok_or_else(|| AppError::LLM(format!("Model {} not available", model)))?;

        binding.client.generate(prompt, options).await
    }

    fn model_info(&self) -> Vec<ModelInfo> {
        let mut aliases: Vec<&str> = self.registry.model_names();
        for alias in self.bindings.keys() {
            if !aliases.contains(&alias.as_str()) {
                aliases.push(alias.as_str());
            }
        }
        aliases.sort_unstable();

        aliases
            .into_iter()
            .map(|alias| match self.bindings.get(alias) {
                Some(binding) => ModelInfo {
                    alias: alias.to_string(),
                    provider: binding.provider.clone(),
                    model: binding.client.model_name().to_string(),
                    loaded: true,
                },
                None => {
                    let provider = self.registry.resolve(alias).ok();
                    ModelInfo {
                        alias: alias.to_string(),
                        provider: provider
                            .as_ref()
                            .map(|p| p.name().to_string())
                            .unwrap_or_default(),
                        model: self
                            .registry
                            .get_model(alias)
                            .map(|m| m.model.clone())
                            .unwrap_or_default(),
                        loaded: false,
                    }
                }
            })
            .collect()
    }

    fn loaded_count(&self) -> usize {
        self.bindings.len()
    }
}
