//! Snapshot-based quote index
//!
//! The searchable state is an immutable [`IndexSnapshot`]. Readers grab the
//! current snapshot (an `Arc` clone under a momentary read lock) and search
//! it without holding any lock. Writers are serialized, build the next
//! snapshot from the current one without blocking readers, and publish it by
//! swapping the `Arc`, so a quote becomes visible whole or not at all.

use super::fuzzy::{tokenize, Token};
use crate::model::QuoteRecord;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// An indexed quote with its pre-tokenized text
#[derive(Debug)]
pub struct IndexedQuote {
    pub record: QuoteRecord,
    pub tokens: Vec<Token>,
    /// Insertion order, used as the final ranking tie-break
    pub position: usize,
}

/// Immutable, point-in-time view of the index
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    entries: Vec<Arc<IndexedQuote>>,
    texts: HashSet<String>,
    version: u64,
}

impl IndexSnapshot {
    pub fn entries(&self) -> &[Arc<IndexedQuote>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.texts.contains(text)
    }

    /// Number of snapshots published before this one
    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Result of an index update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexReport {
    /// Quotes newly made searchable
    pub added: usize,
    /// Quotes whose text was already indexed
    pub duplicates: usize,
    /// Quotes skipped because their text was blank
    pub skipped: usize,
    /// Quotes in the index afterwards
    pub total: usize,
    /// Snapshot version afterwards
    pub version: u64,
}

/// Shared index: one writer at a time, any number of lock-free readers
pub struct SearchIndex {
    current: RwLock<Arc<IndexSnapshot>>,
    writer: Mutex<()>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchIndex {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(IndexSnapshot::default())),
            writer: Mutex::new(()),
        }
    }

    /// The last published snapshot
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.current.read().clone()
    }

    /// Add quotes whose text is not indexed yet
    pub fn extend<I>(&self, records: I) -> IndexReport
    where
        I: IntoIterator<Item = QuoteRecord>,
    {
        let _guard = self.writer.lock();
        let base = self.snapshot();
        self.build_and_publish(&base, records)
    }

    /// Replace the whole index with `records`
    pub fn rebuild<I>(&self, records: I) -> IndexReport
    where
        I: IntoIterator<Item = QuoteRecord>,
    {
        let _guard = self.writer.lock();
        let base = IndexSnapshot {
            version: self.snapshot().version,
            ..IndexSnapshot::default()
        };
        let report = self.build_and_publish(&base, records);

        // A rebuild always publishes, even when it leaves the index empty
        if report.added == 0 {
            let empty = Arc::new(IndexSnapshot {
                version: base.version + 1,
                ..IndexSnapshot::default()
            });
            *self.current.write() = empty;
            return IndexReport {
                version: base.version + 1,
                ..report
            };
        }

        report
    }

    // Callers hold the writer lock
    fn build_and_publish<I>(&self, base: &IndexSnapshot, records: I) -> IndexReport
    where
        I: IntoIterator<Item = QuoteRecord>,
    {
        let start = Instant::now();
        let mut report = IndexReport::default();
        let mut entries = base.entries.clone();
        let mut texts = base.texts.clone();

        for record in records {
            if record.is_blank() {
                report.skipped += 1;
                continue;
            }
            if texts.contains(&record.text) {
                report.duplicates += 1;
                continue;
            }

            texts.insert(record.text.clone());
            let tokens = tokenize(&record.text);
            let position = entries.len();
            entries.push(Arc::new(IndexedQuote {
                record,
                tokens,
                position,
            }));
            report.added += 1;
        }

        if report.added == 0 {
            report.total = base.entries.len();
            report.version = base.version;
            return report;
        }

        let next = Arc::new(IndexSnapshot {
            entries,
            texts,
            version: base.version + 1,
        });
        report.total = next.len();
        report.version = next.version;

        *self.current.write() = next;

        debug!(
            "Published index snapshot v{} with {} quotes (+{}) in {:?}",
            report.version,
            report.total,
            report.added,
            start.elapsed()
        );

        report
    }
}
