use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============= Capabilities =============

/// The closed set of capabilities a request can be routed to.
///
/// Variant order is the fixed pipeline order; `Ord` follows it, so any
/// ordered collection keyed by `Capability` iterates research first,
/// then documentation, then coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Research,
    Documentation,
    Coding,
}

impl Capability {
    /// All capabilities in pipeline order.
    pub const ALL: [Capability; 3] = [
        Capability::Research,
        Capability::Documentation,
        Capability::Coding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::Research => "research",
            Capability::Documentation => "documentation",
            Capability::Coding => "coding",
        }
    }

    /// Human-readable description used by the status and agent listing endpoints.
    pub fn description(&self) -> &'static str {
        match self {
            Capability::Research => "Searches the web and writes a sourced research report",
            Capability::Documentation => "Turns research findings into structured documentation",
            Capability::Coding => "Generates code blocks with an explanation",
        }
    }

    /// Filter `selected` down to pipeline order, dropping duplicates.
    pub fn in_pipeline_order(selected: &[Capability]) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| selected.contains(c))
            .collect()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "research" => Ok(Capability::Research),
            "documentation" => Ok(Capability::Documentation),
            "coding" => Ok(Capability::Coding),
            other => Err(AppError::InvalidInput(format!(
                "Unknown capability '{}' (expected research, documentation or coding)",
                other
            ))),
        }
    }
}

// ============= Agent Results =============

/// Structured payload produced by a capability: string keys to JSON values.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Outcome of one capability within a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AgentResult {
    Completed { payload: Payload },
    Failed { error: String },
}

impl AgentResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, AgentResult::Completed { .. })
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            AgentResult::Completed { payload } => Some(payload),
            AgentResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AgentResult::Completed { .. } => None,
            AgentResult::Failed { error } => Some(error),
        }
    }
}

impl From<Result<Payload>> for AgentResult {
    fn from(result: Result<Payload>) -> Self {
        match result {
            Ok(payload) => AgentResult::Completed { payload },
            Err(e) => AgentResult::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Per-run mapping from capability to its outcome.
///
/// Keys iterate in pipeline order, which is also the order the executor
/// inserts them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedResult(BTreeMap<Capability, AgentResult>);

impl AggregatedResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, capability: Capability, result: AgentResult) {
        self.0.insert(capability, result);
    }

    pub fn get(&self, capability: Capability) -> Option<&AgentResult> {
        self.0.get(&capability)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains_key(&capability)
    }

    /// Capabilities that produced an entry, in execution order.
    pub fn capabilities(&self) -> Vec<Capability> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Capability, &AgentResult)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============= Requests =============

/// One incoming request. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,
}

impl Request {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            capabilities: None,
        }
    }

    pub fn with_capabilities(text: impl Into<String>, capabilities: Vec<Capability>) -> Self {
        Self {
            text: text.into(),
            capabilities: Some(capabilities),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<Capability>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Completed,
    Failed,
}

/// Result of `Orchestrator::process_request`.
///
/// A failed run carries `error` and neither a conversation id nor results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<u64>,
    pub request: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<AggregatedResult>,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessResponse {
    pub fn completed(conversation_id: u64, request: String, results: AggregatedResult) -> Self {
        Self {
            conversation_id: Some(conversation_id),
            request,
            results: Some(results),
            status: RunStatus::Completed,
            error: None,
        }
    }

    pub fn failed(request: String, error: String) -> Self {
        Self {
            conversation_id: None,
            request,
            results: None,
            status: RunStatus::Failed,
            error: Some(error),
        }
    }
}

// ============= LLM Types =============

/// Generation knobs forwarded untouched to the completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Upper bound on generated tokens (positive)
    pub max_tokens: u32,
    /// Sampling temperature in [0, 1]
    pub temperature: f32,
}

impl GenerationOptions {
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.7,
        }
    }
}

// ============= Search Types =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub source: String,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    LLM(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => axum::http::StatusCode::NOT_FOUND,
            AppError::Configuration(_) => axum::http::StatusCode::SERVICE_UNAVAILABLE,
            AppError::LLM(_) | AppError::Search(_) | AppError::Agent(_) | AppError::Internal(_) => {
                axum::http::StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
