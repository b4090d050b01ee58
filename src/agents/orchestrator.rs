use crate::{
    agents::{router, AgentRegistry, PipelineExecutor},
    llm::{ModelInfo, ModelManager, ProviderRegistry, TextCompletionService},
    memory::{ConversationEntry, ConversationStore},
    types::{AppError, Capability, ProcessResponse, Request, Result},
    utils::toml_config::TriadConfig,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

/// Snapshot returned by [`Orchestrator::status`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    /// Registered capabilities in pipeline order
    pub agents: Vec<Capability>,
    /// Model alias each capability generates with
    pub agent_models: BTreeMap<Capability, String>,
    pub model_info: Vec<ModelInfo>,
    pub loaded_models: usize,
    pub conversation_count: usize,
}

/// Composition root: router, pipeline, agent registry and conversation store.
///
/// Every public operation returns a value; whole-run failures come back as a
/// failed [`ProcessResponse`] and are not recorded in the history.
pub struct Orchestrator {
    registry: AgentRegistry,
    llm: Arc<dyn TextCompletionService>,
    store: ConversationStore,
}

impl Orchestrator {
    /// Assemble an orchestrator from already-built parts.
    pub fn new(registry: AgentRegistry, llm: Arc<dyn TextCompletionService>) -> Self {
        Self {
            registry,
            llm,
            store: ConversationStore::new(),
        }
    }

    /// Bind models from configuration and build the agents.
    ///
    /// Fails only if none of the configured model candidates could be loaded.
    pub async fn initialize(config: &TriadConfig) -> Result<Self> {
        info!("Initializing orchestrator...");

        let mut models = ModelManager::new(ProviderRegistry::from_config(config));
        let registry = AgentRegistry::initialize(config, &mut models).await?;

        info!(
            "Orchestrator ready with agents: {}",
            registry
                .capabilities()
                .iter()
                .map(Capability::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self::new(registry, Arc::new(models)))
    }

    /// Route (unless capabilities are given), run the pipeline and record the run.
    ///
    /// An explicit list is de-duplicated and put in pipeline order; an empty
    /// one is treated as absent.
    pub async fn process_request(
        &self,
        text: &str,
        capabilities: Option<Vec<Capability>>,
    ) -> ProcessResponse {
        let request = match capabilities {
            Some(explicit) if !explicit.is_empty() => Request::with_capabilities(text, explicit),
            _ => Request::new(text),
        };

        match self.run(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Request processing failed: {}", e);
                ProcessResponse::failed(request.text, e.to_string())
            }
        }
    }

    async fn run(&self, request: &Request) -> Result<ProcessResponse> {
        if request.text.trim().is_empty() {
            return Err(AppError::InvalidInput("Request text is empty".to_string()));
        }

        let selected = match &request.capabilities {
            Some(explicit) => Capability::in_pipeline_order(explicit),
            None => router::route(&request.text),
        };
        info!(
            "Processing request with agents: {}",
            selected
                .iter()
                .map(Capability::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let results = PipelineExecutor::new(&self.registry, self.llm.as_ref())
            .execute(&request.text, &selected)
            .await?;

        let id = self
            .store
            .append(request.clone(), results.capabilities(), results.clone());

        info!(
            "Conversation {} completed ({} of {} capabilities succeeded)",
            id,
            results.iter().filter(|(_, r)| r.is_completed()).count(),
            results.len()
        );
        Ok(ProcessResponse::completed(id, request.text.clone(), results))
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            agents: self.registry.capabilities(),
            agent_models: self.registry.agent_models(),
            model_info: self.llm.model_info(),
            loaded_models: self.llm.loaded_count(),
            conversation_count: self.store.count(),
        }
    }

    /// Up to `limit` most recent conversations, oldest first.
    pub fn history(&self, limit: usize) -> Vec<ConversationEntry> {
        self.store.recent(limit)
    }

    pub fn conversation(&self, id: u64) -> Option<ConversationEntry> {
        self.store.get(id)
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }
}
