//! Quote record types shared by the corpus, store and search modules

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Longest quote text (in characters) the store accepts
pub const MAX_QUOTE_CHARS: usize = 9999;

/// Store-assigned identifier of a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct QuoteId(pub u64);

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single quotation.
///
/// The `id` stays `None` until the store persists the record. Two records are
/// equal when their texts are equal, whatever their ids, so duplicates can be
/// recognised before anything is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<QuoteId>,
    pub text: String,
}

impl QuoteRecord {
    /// Unpersisted record, as produced from corpus text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    /// Record carrying a store-assigned id
    pub fn with_id(id: QuoteId, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: text.into(),
        }
    }

    /// True when the text holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl PartialEq for QuoteRecord {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for QuoteRecord {}

impl Hash for QuoteRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}
