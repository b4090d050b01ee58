//! Agent Registry
//!
//! A small ordered table from [`Capability`] to the agent implementing it,
//! built once at startup. [`AgentRegistry::initialize`] also binds the model
//! candidates; it fails only when none of them could be loaded. Agents whose
//! model is missing still register and fail when invoked.

use crate::agents::{Agent, CodingAgent, DocumentationAgent, ResearchAgent};
use crate::llm::ModelManager;
use crate::tools::{DuckDuckGoSearch, NoopSearch, SearchProvider};
use crate::types::{AppError, Capability, Result};
use crate::utils::toml_config::TriadConfig;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Capability -> agent table, kept in pipeline order.
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<Arc<dyn Agent>>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the three stock agents from configuration.
    pub fn from_config(config: &TriadConfig, search: Arc<dyn SearchProvider>) -> Self {
        let research = ResearchAgent::new(search, &config.agents.research)
            .with_topic_results(config.search.max_results);

        let mut registry = Self::new();
        registry.register(Arc::new(research));
        registry.register(Arc::new(DocumentationAgent::new(&config.agents.documentation)));
        registry.register(Arc::new(CodingAgent::new(&config.agents.coding)));
        registry
    }

    /// Bind the configured model candidates, then build the agents.
    ///
    /// Errors only if zero candidates loaded.
    pub async fn initialize(config: &TriadConfig, models: &mut ModelManager) -> Result<Self> {
        info!("Initializing agent registry...");

        let candidates = &config.orchestrator.model_candidates;
        let loaded = models.load_models(candidates).await;
        if loaded == 0 {
            return Err(AppError::LLM(format!(
                "No models loaded successfully (tried: {})",
                candidates.join(", ")
            )));
        }

        let search: Arc<dyn SearchProvider> = if config.search.enabled {
            Arc::new(DuckDuckGoSearch::new())
        } else {
            info!("Web search disabled");
            Arc::new(NoopSearch)
        };

        let registry = Self::from_config(config, search);
        for (capability, model) in registry.agent_models() {
            if !models.is_loaded(&model) {
                warn!(
                    "Model '{}' for {} is not loaded; {} requests will fail",
                    model, capability, capability
                );
            }
        }

        info!(
            "Agent registry initialized with {} models ({} of {} candidates)",
            loaded,
            loaded,
            candidates.len()
        );
        Ok(registry)
    }

    /// Register an agent, replacing any existing agent for its capability.
    pub fn register(&mut self, agent: Arc<dyn Agent>) {
        let capability = agent.capability();
        match self
            .agents
            .binary_search_by_key(&capability, |a| a.capability())
        {
            Ok(index) => self.agents[index] = agent,
            Err(index) => self.agents.insert(index, agent),
        }
    }

    pub fn get(&self, capability: Capability) -> Option<&dyn Agent> {
        self.agents
            .iter()
            .find(|a| a.capability() == capability)
            .map(|a| a.as_ref())
    }

    pub fn has_agent(&self, capability: Capability) -> bool {
        self.get(capability).is_some()
    }

    /// Registered capabilities in pipeline order
    pub fn capabilities(&self) -> Vec<Capability> {
        self.agents.iter().map(|a| a.capability()).collect()
    }

    /// Model alias used by each registered agent
    pub fn agent_models(&self) -> BTreeMap<Capability, String> {
        self.agents
            .iter()
            .map(|a| (a.capability(), a.model().to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// Builder for creating AgentRegistry with fluent API
#[derive(Default)]
pub struct AgentRegistryBuilder {
    agents: Vec<Arc<dyn Agent>>,
}

impl AgentRegistryBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent
    pub fn with_agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.agents.push(agent);
        self
    }

    /// Add the stock agents described by `config`
    pub fn from_config(mut self, config: &TriadConfig, search: Arc<dyn SearchProvider>) -> Self {
        self.agents
            .extend(AgentRegistry::from_config(config, search).agents);
        self
    }

    /// Build the AgentRegistry. Later agents replace earlier ones with the
    /// same capability.
    pub fn build(self) -> Result<AgentRegistry> {
        if self.agents.is_empty() {
            return Err(AppError::Configuration(
                "AgentRegistry requires at least one agent".into(),
            ));
        }

        let mut registry = AgentRegistry::new();
        for agent in self.agents {
            registry.register(agent);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ProviderRegistry;
    use crate::tools::NoopSearch;

    fn stock() -> AgentRegistry {
        AgentRegistry::from_config(&TriadConfig::default(), Arc::new(NoopSearch))
    }

    #[test]
    fn test_stock_registry_is_in_pipeline_order() {
        let registry = stock();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.capabilities(), Capability::ALL.to_vec());
    }

    #[test]
    fn test_agent_models() {
        let models = stock().agent_models();
        assert_eq!(models[&Capability::Research], "phi3");
        assert_eq!(models[&Capability::Documentation], "mistral");
        assert_eq!(models[&Capability::Coding], "qwen");
    }

    #[test]
    fn test_register_replaces_same_capability() {
        let mut registry = AgentRegistry::new();
        let config = TriadConfig::default();
        registry.register(Arc::new(CodingAgent::new(&config.agents.coding)));

        let mut other = config.agents.documentation.clone();
        other.model = "custom".to_string();
        registry.register(Arc::new(DocumentationAgent::new(&other)));

        let mut coding = config.agents.coding.clone();
        coding.model = "other-coder".to_string();
        registry.register(Arc::new(CodingAgent::new(&coding)));

        assert_eq!(
            registry.capabilities(),
            vec![Capability::Documentation, Capability::Coding]
        );
        assert_eq!(
            registry.get(Capability::Coding).map(|a| a.model()),
            Some("other-coder")
        );
        assert!(!registry.has_agent(Capability::Research));
    }

    #[test]
    fn test_builder_requires_agents() {
        assert!(AgentRegistryBuilder::new().build().is_err());

        let registry = AgentRegistryBuilder::new()
            .from_config(&TriadConfig::default(), Arc::new(NoopSearch))
            .build()
            .unwrap();
        assert_eq!(registry.len(), 3);
    }

    #[tokio::test]
    async fn test_initialize_fails_without_models() {
        let mut config = TriadConfig::default();
        config.orchestrator.model_candidates = vec!["ghost".to_string()];
        let mut models = ModelManager::new(ProviderRegistry::new());

        let result = AgentRegistry::initialize(&config, &mut models).await;
        assert!(matches!(result, Err(AppError::LLM(_))));
    }

    #[cfg(feature = "ollama")]
    #[tokio::test]
    async fn test_initialize_with_partial_models() {
        use crate::agents::PipelineExecutor;
        use crate::utils::toml_config::ProviderConfig;

        let mut config = TriadConfig::default();
        config.search.enabled = false;
        config.providers.insert(
            "offline".to_string(),
            ProviderConfig::Ollama {
                base_url: "http://127.0.0.1:9".to_string(),
                default_model: "mistral:7b".to_string(),
            },
        );
        if let Some(phi3) = config.models.get_mut("phi3") {
            phi3.verify = false;
        }
        if let Some(mistral) = config.models.get_mut("mistral") {
            mistral.provider = "offline".to_string();
        }
        config.orchestrator.model_candidates =
            vec!["phi3".to_string(), "ghost".to_string(), "mistral".to_string()];

        let mut models = ModelManager::new(ProviderRegistry::from_config(&config));
        let registry = AgentRegistry::initialize(&config, &mut models).await.unwrap();

        // every agent registers even though only one model bound
        assert_eq!(registry.len(), 3);
        assert!(models.is_loaded("phi3"));
        assert!(!models.is_loaded("ghost"));
        assert!(!models.is_loaded("mistral"));

        let results = PipelineExecutor::new(&registry, &models)
            .execute("x", &[Capability::Documentation])
            .await
            .unwrap();
        let documentation = results.get(Capability::Documentation).unwrap();
        assert!(!documentation.is_completed());
        assert_eq!(
            documentation.error(),
            Some("LLM error: Model mistral not available")
        );
    }
}
