//! Conversation memory
//!
//! [`ConversationStore`] is the process-lifetime log of processed requests.
//! Entries are append-only: ids are assigned at append time starting at 0,
//! are gap-free, and are never reused. Appends are serialized by the store's
//! write lock, so concurrent requests can share one store.

use crate::types::{AggregatedResult, Capability, Request};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Default number of entries returned by a history query.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// One processed request and its outcome. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: u64,
    pub request: Request,
    /// Capabilities that actually executed, in pipeline order
    pub capabilities: Vec<Capability>,
    pub results: AggregatedResult,
    pub timestamp: DateTime<Utc>,
}

/// Append-only, in-memory conversation log.
#[derive(Debug, Default)]
pub struct ConversationStore {
    entries: RwLock<Vec<ConversationEntry>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a run and return its id.
    pub fn append(
        &self,
        request: Request,
        capabilities: Vec<Capability>,
        results: AggregatedResult,
    ) -> u64 {
        let mut entries = self.entries.write();
        let id = entries.len() as u64;
        entries.push(ConversationEntry {
            id,
            request,
            capabilities,
            results,
            timestamp: Utc::now(),
        });
        id
    }

    /// Up to `limit` most recent entries, oldest first.
    pub fn recent(&self, limit: usize) -> Vec<ConversationEntry> {
        let entries = self.entries.read();
        let start = entries.len().saturating_sub(limit);
        entries[start..].to_vec()
    }

    pub fn get(&self, id: u64) -> Option<ConversationEntry> {
        let index = usize::try_from(id).ok()?;
        self.entries.read().get(index).cloned()
    }

    /// Total entries ever appended.
    pub fn count(&self) -> usize {
        self.entries.read().len()
    }
}
