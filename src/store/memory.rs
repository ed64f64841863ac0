//! In-memory quote store

use super::{QuoteStore, StoreError};
use crate::model::{QuoteId, QuoteRecord, MAX_QUOTE_CHARS};
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

struct Inner {
    next_id: u64,
    records: Vec<QuoteRecord>,
}

/// Quote store backed by a vector, ids assigned from a counter starting at 1
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a record; used to simulate a store changing under the index
    #[cfg(test)]
    pub fn remove(&self, id: QuoteId) -> bool {
        let mut inner = self.inner.write();
        let before = inner.records.len();
        inner.records.retain(|r| r.id != Some(id));
        inner.records.len() != before
    }

    fn insert(inner: &mut Inner, text: &str) -> Result<QuoteRecord, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyText);
        }

        let text = truncate_chars(text, MAX_QUOTE_CHARS);
        inner.next_id += 1;
        let record = QuoteRecord::with_id(QuoteId(inner.next_id), text);
        inner.records.push(record.clone());
        Ok(record)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                next_id: 0,
                records: Vec::new(),
            }),
        }
    }
}

impl QuoteStore for MemoryStore {
    fn save(&self, text: &str) -> Result<QuoteRecord, StoreError> {
        Self::insert(&mut self.inner.write(), text)
    }

    fn save_all(&self, texts: &[String]) -> Result<Vec<QuoteRecord>, StoreError> {
        let mut inner = self.inner.write();
        let mut saved = Vec::with_capacity(texts.len());

        for (position, text) in texts.iter().enumerate() {
            match Self::insert(&mut inner, text) {
                Ok(record) => saved.push(record),
                Err(e) => warn!("Skipping quote #{}: {}", position + 1, e),
            }
        }

        debug!("Saved {} of {} quotes", saved.len(), texts.len());
        Ok(saved)
    }

    fn get(&self, id: QuoteId) -> Result<Option<QuoteRecord>, StoreError> {
        let inner = self.inner.read();
        // Records are appended with increasing ids, so they stay sorted
        Ok(inner
            .records
            .binary_search_by_key(&Some(id), |r| r.id)
            .ok()
            .map(|idx| inner.records[idx].clone()))
    }

    fn count(&self) -> Result<usize, StoreError> {
        Ok(self.inner.read().records.len())
    }

    fn random(&self) -> Result<Option<QuoteRecord>, StoreError> {
        let inner = self.inner.read();
        Ok(inner.records.choose(&mut rand::thread_rng()).cloned())
    }

    fn all(&self) -> Result<Vec<QuoteRecord>, StoreError> {
        Ok(self.inner.read().records.clone())
    }
}

/// Cut `text` to at most `max` characters on a char boundary
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
