//! Web search provider backed by daedra
//!
//! The research agent consumes search through the [`SearchProvider`] trait;
//! [`DuckDuckGoSearch`] is the production implementation and uses the daedra
//! crate, which queries DuckDuckGo.

use crate::types::{AppError, Result, SearchResult};
use async_trait::async_trait;
use tracing::info;

/// Query -> ordered result list.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;

    fn name(&self) -> &str;
}

/// Web search powered by daedra (DuckDuckGo backend)
pub struct DuckDuckGoSearch;

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput("Search query is empty".to_string()));
        }

        info!("Searching for: {}", query);

        let search_args = daedra::SearchArgs {
            query: query.to_string(),
            options: Some(daedra::SearchOptions {
                num_results: max_results,
                ..Default::default()
            }),
        };

        let response = daedra::tools::search::perform_search(&search_args)
            .await
            .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;

        let results: Vec<SearchResult> = response
            .data
            .iter()
            .take(max_results)
            .map(|r| SearchResult {
                title: r.title.to_string(),
                url: r.url.to_string(),
                snippet: r.description.to_string(),
                source: "DuckDuckGo".to_string(),
            })
            .collect();

        info!("Found {} results", results.len());
        Ok(results)
    }

    fn name(&self) -> &str {
        "duckduckgo"
    }
}

/// Search provider that never returns anything, used when search is disabled.
pub struct NoopSearch;

#[async_trait]
impl SearchProvider for NoopSearch {
    async fn search(&self, _query: &str, _max_results: usize) -> Result<Vec<SearchResult>> {
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

/// Render results as a numbered block for inclusion in a prompt.
pub fn format_search_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "{}. {}\n   URL: {}\n   {}",
                i + 1,
                r.title,
                r.url,
                r.snippet
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str, snippet: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
            source: "DuckDuckGo".to_string(),
        }
    }

    #[test]
    fn test_format_search_results() {
        let formatted = format_search_results(&[
            result("Rust", "https://rust-lang.org", "A language"),
            result("Tokio", "https://tokio.rs", "An async runtime"),
        ]);

        assert!(formatted.starts_with("1. Rust\n   URL: https://rust-lang.org\n   A language"));
        assert!(formatted.contains("2. Tokio"));
    }

    #[test]
    fn test_format_empty_results() {
        assert_eq!(format_search_results(&[]), "");
    }

    #[tokio::test]
    async fn test_noop_search_returns_nothing() {
        let results = NoopSearch.search("anything", 5).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(NoopSearch.name(), "disabled");
    }

    #[tokio::test]
    async fn test_duckduckgo_rejects_empty_query() {
        let result = DuckDuckGoSearch::new().search("   ", 5).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
