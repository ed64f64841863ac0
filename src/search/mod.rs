//! Fuzzy quote search
//!
//! Query validation, tokenization, bounded edit distance, ranking and the
//! snapshot index that makes indexing and searching safe to run concurrently.

pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod query;
pub mod ranking;


pub use engine::{EngineConfig, MatchResult, SearchEngine, SearchResult};
pub use error::ValidationError;
pub use index::IndexReport;
pub use query::SearchQuery;
pub use ranking::MatchScore;
