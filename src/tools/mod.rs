//! External tools the agents rely on
//!
//! # Module Structure
//!
//! - [`search`](crate::tools::search) - Web search (DuckDuckGo via daedra)
//!
//! ```ignore
//! let provider = DuckDuckGoSearch::new();
//! let results = provider.search("rust async runtimes", 5).await?;
//! println!("{}", format_search_results(&results));
//! ```

/// Web search provider boundary and the DuckDuckGo implementation.
pub mod search;

pub use search::{format_search_results, DuckDuckGoSearch, NoopSearch, SearchProvider};
