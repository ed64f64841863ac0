//! Quote service
//!
//! Wires the store and the search engine together. Everything is handed in
//! through the constructor; the presentation layer (CLI and MCP tools) talks
//! only to this type.

use crate::config::Config;
use crate::corpus::{load_lines, parse_lines, CorpusImporter, ImportReport};
use crate::error::AppError;
use crate::model::QuoteRecord;
use crate::search::{EngineConfig, IndexReport, MatchResult, SearchEngine, SearchQuery};
use crate::store::{MemoryStore, QuoteStore, StoreError};
use serde::Serialize;
use std::cell::Cell;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sizes of the store and the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub stored: usize,
    pub indexed: usize,
    pub index_version: u64,
}

pub struct QuoteService {
    store: Arc<dyn QuoteStore>,
    engine: Arc<SearchEngine>,
}

impl QuoteService {
    pub fn new(store: Arc<dyn QuoteStore>, engine: Arc<SearchEngine>) -> Self {
        Self { store, engine }
    }

    /// In-memory store plus an engine configured from `config`
    pub fn from_config(config: &Config) -> Self {
        let engine = SearchEngine::with_config(EngineConfig {
            search_budget: config.search_budget(),
        });
        Self::new(Arc::new(MemoryStore::new()), Arc::new(engine))
    }

    /// Import the corpus into an empty store, then index whatever the store
    /// holds. An unreadable corpus is reported in the returned import report.
    pub fn import_corpus(&self, corpus_path: &Path) -> Result<(ImportReport, IndexReport), AppError> {
        let import = CorpusImporter::new(self.store.clone(), corpus_path).run()?;
        let index = self.index_store()?;
        Ok((import, index))
    }

    /// Feed every stored quote into the search engine
    pub fn index_store(&self) -> Result<IndexReport, AppError> {
        let records = self.store.all()?;
        let report = self.engine.index(records);

        if report.skipped > 0 {
            warn!("Skipped {} quotes with blank text while indexing", report.skipped);
        }
        info!(
            "Search index holds {} quotes ({} added)",
            report.total, report.added
        );

        Ok(report)
    }

    /// Validate the parameters and run a search.
    ///
    /// Quotes that have vanished from the store are passed over before the
    /// best `max_hits` are picked, so they never crowd out live matches.
    pub fn search(
        &self,
        term: &str,
        max_hits: usize,
        max_edit_distance: usize,
    ) -> Result<MatchResult, AppError> {
        let query = SearchQuery::new(term, max_hits, max_edit_distance)?;

        let store_error: Cell<Option<StoreError>> = Cell::new(None);
        let results = self.engine.search_live(&query, |record| match record.id {
            Some(id) => match self.store.get(id) {
                Ok(Some(_)) => true,
                Ok(None) => {
                    debug!("Indexed quote {} no longer in store, skipping", id);
                    false
                }
                Err(e) => {
                    store_error.set(Some(e));
                    false
                }
            },
            None => true,
        })?;

        if let Some(e) = store_error.into_inner() {
            return Err(e.into());
        }
        if results.truncated {
            warn!(
                "Search for '{}' hit its time budget, returning {} partial results",
                query.term,
                results.len()
            );
        }

        Ok(results)
    }

    /// A uniformly random quote, `None` when there are none
    pub fn random(&self) -> Result<Option<QuoteRecord>, AppError> {
        Ok(self.store.random()?)
    }

    pub fn stats(&self) -> Result<Stats, AppError> {
        let (indexed, index_version) = self.engine.stats();
        Ok(Stats {
            stored: self.store.count()?,
            indexed,
            index_version,
        })
    }

    /// Split a corpus file into quote texts without storing anything
    pub fn parse_corpus_file(&self, corpus_path: &Path) -> Result<Vec<String>, AppError> {
        let lines = load_lines(corpus_path)?;
        Ok(parse_lines(&lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CORPUS: &str = "\"Laugh and the world laughs with you, snore and you \n\
sleep alone.\" -- Anthony Burgess\n\
.\n\
\"A successful man is one who makes more money than his \n\
wife can spend.\" -- Lana Turner\n\
.\n\
Happiness is not something ready made. \n\
-- Dalai Lama\n";

    fn corpus_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CORPUS.as_bytes()).unwrap();
        file
    }

    fn service() -> (QuoteService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let service = QuoteService::new(store.clone(), Arc::new(SearchEngine::new()));
        (service, store)
    }

    #[test]
    fn test_import_then_search() {
        let (service, _) = service();
        let file = corpus_file();

        let (import, index) = service.import_corpus(file.path()).unwrap();
        assert_eq!(import.total, 3);
        assert_eq!(index.added, 3);

        let results = service.search("hapiness", 10, 2).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].record.text.starts_with("Happiness is not"));
        assert!(results[0].record.id.is_some());
    }

    #[test]
    fn test_second_import_is_a_noop() {
        let (service, _) = service();
        let file = corpus_file();

        service.import_corpus(file.path()).unwrap();
        let (import, index) = service.import_corpus(file.path()).unwrap();

        assert_eq!(import.total, 3);
        assert_eq!(index.added, 0);
        assert_eq!(index.duplicates, 3);
        assert_eq!(service.search("successful", 10, 0).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_corpus_leaves_service_usable() {
        let (service, _) = service();
        let dir = tempfile::tempdir().unwrap();

        let (import, index) = service.import_corpus(&dir.path().join("gone.txt")).unwrap();
        assert_eq!(import.total, 0);
        assert_eq!(index.total, 0);
        assert!(service.search("anything", 10, 2).unwrap().is_empty());
        assert!(service.random().unwrap().is_none());
    }

    #[test]
    fn test_search_validation_errors() {
        let (service, _) = service();

        let err = service.search("ab", 10, 2).unwrap_err();
        assert_eq!(err.error_code(), "invalid_input");
        assert!(err.message().contains("term too short"));

        let err = service.search("abcd", 501, 2).unwrap_err();
        assert!(err.message().contains("maxHits out of range"));

        let err = service.search("abcd", 10, 11).unwrap_err();
        assert!(err.message().contains("maxEditDistance out of range"));
    }

    #[test]
    fn test_stale_index_entries_are_skipped() {
        let (service, store) = service();
        let file = corpus_file();
        service.import_corpus(file.path()).unwrap();

        let hit = service.search("Burgess", 10, 0).unwrap();
        assert_eq!(hit.len(), 1);
        let id = hit[0].record.id.unwrap();

        assert!(store.remove(id));
        assert!(service.search("Burgess", 10, 0).unwrap().is_empty());
    }

    #[test]
    fn test_removed_top_hit_does_not_use_up_max_hits() {
        let (service, store) = service();
        store
            .save_all(&[
                "Freedom first".to_string(),
                "Freedom second".to_string(),
                "Freedom third".to_string(),
            ])
            .unwrap();
        service.index_store().unwrap();

        let before = service.search("Freedom", 1, 0).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].record.text, "Freedom first");

        assert!(store.remove(before[0].record.id.unwrap()));

        let after = service.search("Freedom", 1, 0).unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].record.text, "Freedom second");

        let all = service.search("Freedom", 10, 0).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_random_and_stats() {
        let (service, _) = service();
        let file = corpus_file();
        service.import_corpus(file.path()).unwrap();

        let quote = service.random().unwrap().expect("a quote");
        assert!(!quote.is_blank());

        let stats = service.stats().unwrap();
        assert_eq!(
            stats,
            Stats {
                stored: 3,
                indexed: 3,
                index_version: 1
            }
        );
    }

    #[test]
    fn test_parse_corpus_file() {
        let (service, store) = service();
        let file = corpus_file();

        let quotes = service.parse_corpus_file(file.path()).unwrap();
        assert_eq!(quotes.len(), 3);
        assert_eq!(
            quotes[1],
            "\"A successful man is one who makes more money than his wife can spend.\" -- Lana Turner"
        );
        // Parsing alone stores nothing
        assert_eq!(store.count().unwrap(), 0);
    }
}
