//! Pipeline Executor
//!
//! Runs the selected capabilities strictly in pipeline order
//! (research, documentation, coding):
//!
//! - research gets the raw request as its query
//! - documentation gets the research payload when research succeeded, and
//!   otherwise a synthesized `{"research_report": <request>}` source
//! - coding gets the raw request as its task, and runs only when
//!   [`is_coding_request`] holds; otherwise it leaves no entry at all
//!
//! Each capability's error is caught at its own boundary and recorded as a
//! failed [`AgentResult`]; the remaining capabilities still run.

use crate::agents::router::is_coding_request;
use crate::agents::{AgentInput, AgentRegistry};
use crate::llm::TextCompletionService;
use crate::types::{AgentResult, AggregatedResult, AppError, Capability, Payload, Result};
use serde_json::Value;
use tracing::{debug, error, info};

pub struct PipelineExecutor<'a> {
    registry: &'a AgentRegistry,
    llm: &'a dyn TextCompletionService,
}

impl<'a> PipelineExecutor<'a> {
    pub fn new(registry: &'a AgentRegistry, llm: &'a dyn TextCompletionService) -> Self {
        Self { registry, llm }
    }

    /// Run `selected` against `request`.
    ///
    /// Returns an error only for whole-run failures, such as a selected
    /// capability with no registered agent; nothing runs in that case.
    pub async fn execute(&self, request: &str, selected: &[Capability]) -> Result<AggregatedResult> {
        let order = Capability::in_pipeline_order(selected);

        if let Some(missing) = order.iter().find(|&&c| !self.registry.has_agent(c)) {
            return Err(AppError::Agent(format!(
                "No agent registered for capability '{}'",
                missing
            )));
        }

        let mut results = AggregatedResult::new();

        for capability in order {
            let input = match capability {
                Capability::Research => AgentInput::Query(request.to_string()),
                Capability::Documentation => {
                    AgentInput::Source(documentation_source(&results, request))
                }
                Capability::Coding => {
                    if !is_coding_request(request) {
                        debug!("Coding selected but request is not a coding request, skipping");
                        continue;
                    }
                    AgentInput::Task(request.to_string())
                }
            };

            let result = self.run(capability, input).await;
            results.insert(capability, result);
        }

        Ok(results)
    }

    async fn run(&self, capability: Capability, input: AgentInput) -> AgentResult {
        let Some(agent) = self.registry.get(capability) else {
            return AgentResult::Failed {
                error: format!("No agent registered for capability '{}'", capability),
            };
        };

        info!("Running {} agent", capability);
        let outcome = agent.execute(input, self.llm).await;
        if let Err(e) = &outcome {
            error!("{} agent failed: {}", capability, e);
        }
        AgentResult::from(outcome)
    }
}

/// Documentation's input: research's payload when it succeeded, otherwise
/// the raw request wrapped as the report.
fn documentation_source(results: &AggregatedResult, request: &str) -> Payload {
    match results.get(Capability::Research).and_then(AgentResult::payload) {
        Some(payload) => payload.clone(),
        None => {
            let mut source = Payload::new();
            source.insert(
                "research_report".to_string(),
                Value::String(request.to_string()),
            );
            source
        }
    }
}
