//! Quote storage
//!
//! The store owns id assignment and answers count and random-pick queries.
//! Callers that run on an async runtime should wrap calls in
//! `spawn_blocking` when a store implementation may block.

pub mod memory;

use crate::model::{QuoteId, QuoteRecord};
use thiserror::Error;

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Quote text is empty")]
    EmptyText,
}

/// Storage trait implemented by quote stores
pub trait QuoteStore: Send + Sync {
    /// Persist one quote and return it with its assigned id
    fn save(&self, text: &str) -> Result<QuoteRecord, StoreError>;

    /// Persist many quotes, in order. Texts the store refuses are skipped.
    fn save_all(&self, texts: &[String]) -> Result<Vec<QuoteRecord>, StoreError>;

    fn get(&self, id: QuoteId) -> Result<Option<QuoteRecord>, StoreError>;

    fn count(&self) -> Result<usize, StoreError>;

    /// Uniformly random quote, or `None` when the store is empty
    fn random(&self) -> Result<Option<QuoteRecord>, StoreError>;

    /// Every stored quote in insertion order, for warming a search index
    fn all(&self) -> Result<Vec<QuoteRecord>, StoreError>;
}
