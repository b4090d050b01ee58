//! Research agent: web search followed by a model-written report.

use crate::{
    agents::{into_payload, Agent, AgentInput},
    llm::TextCompletionService,
    tools::{format_search_results, SearchProvider},
    types::{AppError, Capability, GenerationOptions, Payload, Result, SearchResult},
    utils::toml_config::ResearchAgentConfig,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

const AGENT_NAME: &str = "ResearchAgent";

/// Results fetched per subtopic in [`ResearchAgent::search_specific_topic`].
const SUBTOPIC_RESULTS: usize = 3;

pub struct ResearchAgent {
    search: Arc<dyn SearchProvider>,
    model: String,
    options: GenerationOptions,
    max_sources: usize,
    topic_results: usize,
}

impl ResearchAgent {
    pub fn new(search: Arc<dyn SearchProvider>, config: &ResearchAgentConfig) -> Self {
        Self {
            search,
            model: config.model.clone(),
            options: config.options(),
            max_sources: config.max_sources,
            topic_results: config.max_sources,
        }
    }

    /// Override how many results the main topic search in
    /// [`search_specific_topic`](Self::search_specific_topic) fetches.
    pub fn with_topic_results(mut self, topic_results: usize) -> Self {
        self.topic_results = topic_results;
        self
    }

    pub fn format_prompt(&self, query: &str, search_results: &str) -> String {
        let mut prompt = format!("{}\n\n", self.system_prompt());

        if !search_results.is_empty() {
            prompt.push_str(&format!(
                "Based on the following search results:\n{}\n\n",
                search_results
            ));
        }

        prompt.push_str(&format!("Research Query: {}\n\n", query));
        prompt.push_str("Please provide a comprehensive research report:");
        prompt
    }

    /// Search errors degrade to an empty source list.
    async fn search_or_empty(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        match self.search.search(query, max_results).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Search failed for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    pub async fn conduct_research(
        &self,
        query: &str,
        llm: &dyn TextCompletionService,
    ) -> Result<Payload> {
        info!("Starting research on: {}", query);

        let sources = self.search_or_empty(query, self.max_sources).await;
        let prompt = self.format_prompt(query, &format_search_results(&sources));

        let report = llm.generate(&self.model, &prompt, &self.options).await?;

        info!("Research completed for: {}", query);
        Ok(into_payload(json!({
            "agent": AGENT_NAME,
            "query": query,
            "research_report": report,
            "source_count": sources.len(),
            "sources": sources,
        })))
    }

    /// Search a topic and each `"<topic> <subtopic>"` refinement, without
    /// generating a report.
    pub async fn search_specific_topic(&self, topic: &str, subtopics: &[String]) -> Payload {
        let mut all_results = self.search_or_empty(topic, self.topic_results).await;

        for subtopic in subtopics {
            let sub_query = format!("{} {}", topic, subtopic);
            all_results.extend(self.search_or_empty(&sub_query, SUBTOPIC_RESULTS).await);
        }

        into_payload(json!({
            "topic": topic,
            "subtopics": subtopics,
            "total_sources": all_results.len(),
            "results": all_results,
        }))
    }
}

#[async_trait]
impl Agent for ResearchAgent {
    async fn execute(&self, input: AgentInput, llm: &dyn TextCompletionService) -> Result<Payload> {
        match input {
            AgentInput::Query(query) => self.conduct_research(&query, llm).await,
            other => Err(AppError::InvalidInput(format!(
                "{} expects a query, got {}",
                AGENT_NAME,
                other.kind()
            ))),
        }
    }

    fn system_prompt(&self) -> String {
        r#"You are a Research Agent specialized in conducting comprehensive research on any topic.
Your capabilities include:
- Web searching and information gathering
- Analyzing and synthesizing information from multiple sources
- Providing detailed, well-structured research reports
- Fact-checking and verifying information accuracy

Always provide:
1. Clear, factual information
2. Multiple perspectives when relevant
3. Source citations
4. Structured, easy-to-read reports"#
            .to_string()
    }

    fn capability(&self) -> Capability {
        Capability::Research
    }

    fn model(&self) -> &str {
        &self.model
    }
}
