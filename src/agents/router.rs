//! Keyword router
//!
//! Routing is a pure function of the request text: lower-case it, check each
//! capability's keyword set by substring containment, and emit the matching
//! capabilities in pipeline order. No match routes to research alone.
//!
//! The coding capability is double-gated. [`route`] selects it on broad
//! keywords; the pipeline then runs it only if [`is_coding_request`] holds.

use crate::types::Capability;
use serde::Serialize;

const RESEARCH_KEYWORDS: &[&str] = &["research", "find", "search", "information", "analyze", "study"];

const DOCUMENTATION_KEYWORDS: &[&str] = &["document", "write", "report", "summary", "documentation"];

const CODING_KEYWORDS: &[&str] = &[
    "code",
    "program",
    "script",
    "function",
    "class",
    "algorithm",
    "debug",
];

/// Stricter phrases the coding stage requires before it runs.
const CODING_INDICATORS: &[&str] = &[
    "write code",
    "create function",
    "build script",
    "program",
    "algorithm",
    "class",
    "method",
    "debug",
    "fix code",
];

fn keywords(capability: Capability) -> &'static [&'static str] {
    match capability {
        Capability::Research => RESEARCH_KEYWORDS,
        Capability::Documentation => DOCUMENTATION_KEYWORDS,
        Capability::Coding => CODING_KEYWORDS,
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

/// Capabilities relevant to `text`, in pipeline order. Never empty.
pub fn route(text: &str) -> Vec<Capability> {
    let lowered = text.to_lowercase();

    let selected: Vec<Capability> = Capability::ALL
        .iter()
        .copied()
        .filter(|&capability| contains_any(&lowered, keywords(capability)))
        .collect();

    if selected.is_empty() {
        tracing::debug!("No routing keywords matched, defaulting to research");
        vec![Capability::Research]
    } else {
        selected
    }
}

/// Whether the coding stage should actually run for `text`.
pub fn is_coding_request(text: &str) -> bool {
    contains_any(&text.to_lowercase(), CODING_INDICATORS)
}

/// Router output plus the coding gate, for inspection without running anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingDecision {
    pub capabilities: Vec<Capability>,
    pub coding_gate: bool,
}

impl RoutingDecision {
    pub fn for_request(text: &str) -> Self {
        Self {
            capabilities: route(text),
            coding_gate: is_coding_request(text),
        }
    }

    /// Capabilities the pipeline would execute, coding dropped when gated off.
    pub fn executed(&self) -> Vec<Capability> {
        self.capabilities
            .iter()
            .copied()
            .filter(|&c| c != Capability::Coding || self.coding_gate)
            .collect()
    }
}
