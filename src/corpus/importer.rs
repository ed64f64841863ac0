//! Startup import of the quote corpus
//!
//! Runs once when the application starts. Quotes are only imported into a
//! store that holds none yet; an unreadable corpus is logged and leaves the
//! store empty instead of aborting startup.

use super::loader::load_lines;
use super::parser::parse_lines;
use crate::store::{QuoteStore, StoreError};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// What the import did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    /// Store already had quotes, corpus untouched
    AlreadyPopulated { existing: usize },
    /// Corpus parsed and saved
    Imported {
        lines: usize,
        parsed: usize,
        saved: usize,
    },
    /// Corpus readable but held no lines
    EmptyCorpus,
    /// Corpus could not be read
    Failed { reason: String },
}

/// Import outcome plus the store size afterwards
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    pub total: usize,
}

pub struct CorpusImporter {
    store: Arc<dyn QuoteStore>,
    corpus_path: PathBuf,
}

impl CorpusImporter {
    pub fn new(store: Arc<dyn QuoteStore>, corpus_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            corpus_path: corpus_path.into(),
        }
    }

    /// Import the corpus if the store is empty
    pub fn run(&self) -> Result<ImportReport, StoreError> {
        let existing = self.store.count()?;
        if existing > 0 {
            info!(
                "Store already holds {} quotes, skipping corpus import",
                existing
            );
            return Ok(ImportReport {
                outcome: ImportOutcome::AlreadyPopulated { existing },
                total: existing,
            });
        }

        info!(
            "No quotes stored yet, importing from \"{}\"",
            self.corpus_path.display()
        );

        let outcome = match load_lines(&self.corpus_path) {
            Err(e) => {
                error!("Corpus import failed: {}", e);
                ImportOutcome::Failed {
                    reason: e.to_string(),
                }
            }
            Ok(lines) if lines.is_empty() => {
                error!("Corpus file contained 0 lines");
                ImportOutcome::EmptyCorpus
            }
            Ok(lines) => {
                let quotes = parse_lines(&lines);
                info!("Found {} quotes in corpus", quotes.len());

                let saved = self.store.save_all(&quotes)?;
                ImportOutcome::Imported {
                    lines: lines.len(),
                    parsed: quotes.len(),
                    saved: saved.len(),
                }
            }
        };

        let total = self.store.count()?;
        info!("{} quotes loaded into the store", total);

        Ok(ImportReport { outcome, total })
    }
}
