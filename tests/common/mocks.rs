//! Stub collaborators shared by the integration tests.
//!
//! - [`StubCompletion`] answers deterministically per model alias and records
//!   every call
//! - [`StubSearch`] returns a fixed number of fake results
//! - [`FailingSearch`] always errors

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use triad::llm::{ModelInfo, TextCompletionService};
use triad::tools::SearchProvider;
use triad::types::{AppError, GenerationOptions, Result, SearchResult};
use triad::{AgentRegistry, Orchestrator, TriadConfig};

/// One recorded `generate` call.
#[derive(Debug, Clone)]
pub struct Call {
    pub model: String,
    pub prompt: String,
    pub options: GenerationOptions,
}

/// Deterministic completion service.
///
/// Responds `"<model> says: ok"` unless the model is marked failing, in which
/// case it errors. Coding requests get a fenced block so extraction has
/// something to find.
#[derive(Default)]
pub struct StubCompletion {
    failing: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl StubCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every generation against `model`.
    pub fn failing_model(mut self, model: &str) -> Self {
        self.failing.insert(model.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl TextCompletionService for StubCompletion {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        self.calls.lock().push(Call {
            model: model.to_string(),
            prompt: prompt.to_string(),
            options: *options,
        });

        if self.failing.contains(model) {
            return Err(AppError::LLM(format!("Model {} not available", model)));
        }

        if prompt.contains("Coding Task:") {
            return Ok(format!(
                "{} says: here you go\n\n```python\nprint('ok')\n```",
                model
            ));
        }
        Ok(format!("{} says: ok", model))
    }

    fn model_info(&self) -> Vec<ModelInfo> {
        ["mistral", "phi3", "qwen"]
            .iter()
            .map(|alias| ModelInfo {
                alias: alias.to_string(),
                provider: "Stub".to_string(),
                model: format!("{}:stub", alias),
                loaded: !self.failing.contains(*alias),
            })
            .collect()
    }
}

/// Search provider returning `count` fake results per query.
pub struct StubSearch {
    pub count: usize,
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        Ok((0..self.count.min(max_results))
            .map(|i| SearchResult {
                title: format!("{} result {}", query, i + 1),
                url: format!("https://example.org/{}", i + 1),
                snippet: format!("About {}", query),
                source: "Stub".to_string(),
            })
            .collect())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

pub struct FailingSearch;

#[async_trait]
impl SearchProvider for FailingSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchResult>> {
        Err(AppError::Search("search backend down".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Orchestrator over the stock agents, wired to the given stubs.
pub fn orchestrator_with(
    llm: Arc<StubCompletion>,
    search: Arc<dyn SearchProvider>,
) -> Orchestrator {
    let registry = AgentRegistry::from_config(&TriadConfig::default(), search);
    Orchestrator::new(registry, llm)
}

/// Orchestrator with a healthy stub backend and two search results per query.
pub fn stub_orchestrator() -> (Orchestrator, Arc<StubCompletion>) {
    let llm = Arc::new(StubCompletion::new());
    let orchestrator = orchestrator_with(Arc::clone(&llm), Arc::new(StubSearch { count: 2 }));
    (orchestrator, llm)
}
