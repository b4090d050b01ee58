//! Agents and the pipeline that sequences them
//!
//! - [`Agent`] - One capability's unit of work
//! - [`research`], [`documentation`], [`coding`] - The three agents
//! - [`AgentRegistry`] - Ordered capability -> agent table
//! - [`router`] - Keyword routing and the strict coding gate
//! - [`PipelineExecutor`] - Runs selected capabilities in pipeline order
//! - [`Orchestrator`] - Public entry point tying it all together

pub mod coding;
pub mod documentation;
pub mod orchestrator;
pub mod pipeline;
pub mod registry;
pub mod research;
pub mod router;

use crate::llm::TextCompletionService;
use crate::types::{Capability, Payload, Result};
use async_trait::async_trait;
use serde_json::Value;

pub use coding::CodingAgent;
pub use documentation::DocumentationAgent;
pub use orchestrator::{Orchestrator, StatusReport};
pub use pipeline::PipelineExecutor;
pub use registry::{AgentRegistry, AgentRegistryBuilder};
pub use research::ResearchAgent;

/// Capability-specific input handed to [`Agent::execute`].
#[derive(Debug, Clone)]
pub enum AgentInput {
    /// Research query (the raw request text)
    Query(String),
    /// Content to document, usually the research payload
    Source(Payload),
    /// Coding task (the raw request text)
    Task(String),
}

impl AgentInput {
    pub fn kind(&self) -> &'static str {
        match self {
            AgentInput::Query(_) => "query",
            AgentInput::Source(_) => "source",
            AgentInput::Task(_) => "task",
        }
    }
}

/// Base trait for all agents
#[async_trait]
pub trait Agent: Send + Sync {
    /// Run the agent's primary operation against the completion service
    async fn execute(&self, input: AgentInput, llm: &dyn TextCompletionService) -> Result<Payload>;

    /// Get the agent's system prompt
    fn system_prompt(&self) -> String;

    /// The capability this agent implements
    fn capability(&self) -> Capability;

    /// Model alias the agent generates with
    fn model(&self) -> &str;
}

/// Unwrap a `json!` object literal into a payload map.
pub(crate) fn into_payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        other => {
            let mut map = Payload::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}
