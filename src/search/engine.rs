//! Search Engine Integration
//!
//! Ties together query validation, the snapshot index, fuzzy matching and
//! ranking.

use super::error::ValidationError;
use super::fuzzy::{exact_match, FuzzyMatcher};
use super::index::{IndexReport, IndexSnapshot, IndexedQuote, SearchIndex};
use super::query::SearchQuery;
use super::ranking::{rank, MatchScore};
use crate::model::QuoteRecord;
use serde::Serialize;
use std::ops::Deref;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How many candidates are scanned between budget checks
const BUDGET_CHECK_INTERVAL: usize = 256;

/// Search result with the quote and its score
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// The matched quote
    pub record: QuoteRecord,
    /// Match score
    pub score: MatchScore,
    /// Which quote words matched
    pub matched_terms: Vec<String>,
}

/// Ordered search results, most relevant first
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchResult {
    pub hits: Vec<SearchResult>,
    /// The search budget ran out before every quote was scanned, so better
    /// matches may exist
    pub truncated: bool,
}

impl Deref for MatchResult {
    type Target = [SearchResult];

    fn deref(&self) -> &[SearchResult] {
        &self.hits
    }
}

impl IntoIterator for MatchResult {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits.into_iter()
    }
}

/// Engine settings
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Wall-clock budget for scanning candidates. When it runs out the
    /// search ranks what it has found so far.
    pub search_budget: Option<Duration>,
}

/// Fuzzy quote search over a snapshot index
pub struct SearchEngine {
    index: SearchIndex,
    config: EngineConfig,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Create a new search engine with default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            index: SearchIndex::new(),
            config,
        }
    }

    /// Make quotes searchable. Texts already indexed are ignored, blank
    /// texts are skipped and counted in the report.
    pub fn index<I>(&self, records: I) -> IndexReport
    where
        I: IntoIterator<Item = QuoteRecord>,
    {
        self.index.extend(records)
    }

    /// Throw away the index and build it from `records`
    pub fn rebuild<I>(&self, records: I) -> IndexReport
    where
        I: IntoIterator<Item = QuoteRecord>,
    {
        self.index.rebuild(records)
    }

    /// Number of indexed quotes and the current snapshot version
    pub fn stats(&self) -> (usize, u64) {
        let snapshot = self.index.snapshot();
        (snapshot.len(), snapshot.version())
    }

    /// Find up to `query.max_hits` quotes matching `query.term`.
    ///
    /// With `max_edit_distance == 0` a quote matches when it contains the
    /// term verbatim (case-sensitive). Otherwise some word of the quote has
    /// to be within the edit distance of a word of the term.
    pub fn search(&self, query: &SearchQuery) -> Result<MatchResult, ValidationError> {
        self.search_live(query, |_| true)
    }

    /// Like [`search`](Self::search), but matching quotes for which
    /// `is_live` returns false are passed over before the top `max_hits` are
    /// selected, so they never take the place of a live match.
    pub fn search_live<F>(&self, query: &SearchQuery, is_live: F) -> Result<MatchResult, ValidationError>
    where
        F: Fn(&QuoteRecord) -> bool,
    {
        query.validate()?;

        let snapshot = self.index.snapshot();
        if snapshot.is_empty() {
            return Ok(MatchResult::default());
        }

        let start = Instant::now();
        let (mut candidates, truncated) = if query.is_exact() {
            self.scan(&snapshot, start, |entry| {
                exact_match(&entry.record.text, &query.term)
                    .then(|| (MatchScore::exact(entry.position), vec![query.term.clone()]))
            }, &is_live)
        } else {
            let matcher = FuzzyMatcher::new(&query.term, query.max_edit_distance);
            self.scan(&snapshot, start, |entry| {
                matcher.match_tokens(&entry.tokens).map(|m| {
                    (
                        MatchScore::from_fuzzy(&m, entry.position),
                        m.matched_tokens,
                    )
                })
            }, &is_live)
        };

        let found = candidates.len();
        rank(&mut candidates, query.max_hits);

        debug!(
            "Search '{}' (max distance {}) matched {} of {} quotes in {:?}",
            query.term,
            query.max_edit_distance,
            found,
            snapshot.len(),
            start.elapsed()
        );

        let hits = candidates
            .into_iter()
            .map(|(score, (entry, matched_terms))| SearchResult {
                record: entry.record.clone(),
                score,
                matched_terms,
            })
            .collect();

        Ok(MatchResult { hits, truncated })
    }

    /// Run `matches` over every indexed quote, honouring the search budget.
    /// The flag is set when the budget cut the scan short.
    #[allow(clippy::type_complexity)]
    fn scan<'a, F, L>(
        &self,
        snapshot: &'a IndexSnapshot,
        start: Instant,
        matches: F,
        is_live: &L,
    ) -> (Vec<(MatchScore, (&'a Arc<IndexedQuote>, Vec<String>))>, bool)
    where
        F: Fn(&IndexedQuote) -> Option<(MatchScore, Vec<String>)>,
        L: Fn(&QuoteRecord) -> bool,
    {
        let mut candidates = Vec::new();

        for (scanned, entry) in snapshot.entries().iter().enumerate() {
            if let Some(budget) = self.config.search_budget {
                if scanned > 0
                    && scanned % BUDGET_CHECK_INTERVAL == 0
                    && start.elapsed() > budget
                {
                    warn!(
                        "Search budget of {:?} exhausted after {} of {} quotes",
                        budget,
                        scanned,
                        snapshot.len()
                    );
                    return (candidates, true);
                }
            }

            if let Some((score, matched_terms)) = matches(entry.as_ref()) {
                if is_live(&entry.record) {
                    candidates.push((score, (entry, matched_terms)));
                } else {
                    debug!("Quote at index position {} is gone, skipping", entry.position);
                }
            }
        }

        (candidates, false)
    }
}
