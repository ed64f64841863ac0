//! Search query construction and validation

use super::error::ValidationError;
use std::ops::RangeInclusive;

/// Shortest accepted search term, in characters after trimming
pub const MIN_TERM_CHARS: usize = 4;
/// Accepted values for `max_hits`
pub const MAX_HITS_RANGE: RangeInclusive<usize> = 1..=500;
/// Largest accepted `max_edit_distance`
pub const MAX_EDIT_DISTANCE: usize = 10;

/// A validated fuzzy search request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Trimmed search term
    pub term: String,
    /// Upper bound on returned quotes
    pub max_hits: usize,
    /// Edit distance tolerance; 0 disables fuzzy matching
    pub max_edit_distance: usize,
}

impl SearchQuery {
    /// Build a query from raw user input. The term is trimmed; out-of-range
    /// values are rejected, never clamped.
    pub fn new(
        term: &str,
        max_hits: usize,
        max_edit_distance: usize,
    ) -> Result<Self, ValidationError> {
        let query = Self {
            term: term.trim().to_string(),
            max_hits,
            max_edit_distance,
        };
        query.validate()?;
        Ok(query)
    }

    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), ValidationError> {
        let length = self.term.trim().chars().count();
        if length < MIN_TERM_CHARS {
            return Err(ValidationError::TermTooShort {
                length,
                min: MIN_TERM_CHARS,
            });
        }

        if !MAX_HITS_RANGE.contains(&self.max_hits) {
            return Err(ValidationError::MaxHitsOutOfRange {
                value: self.max_hits,
            });
        }

        if self.max_edit_distance > MAX_EDIT_DISTANCE {
            return Err(ValidationError::MaxEditDistanceOutOfRange {
                value: self.max_edit_distance,
            });
        }

        Ok(())
    }

    /// True when only exact substring matching applies
    pub fn is_exact(&self) -> bool {
        self.max_edit_distance == 0
    }
}
