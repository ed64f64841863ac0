//! Ranking & Scoring
//!
//! Quotes are ordered by how close their best word is to the search term.
//! Exact matches (distance 0) come first. Among equally close matches, more
//! matched term words and a smaller summed distance win, and the remaining
//! ties go to the quote indexed first.

use super::fuzzy::FuzzyMatch;
use serde::Serialize;
use std::cmp::Ordering;

/// Relevance of one matched quote. Compares greater when more relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchScore {
    /// Smallest edit distance among matched words; 0 for exact matches
    pub distance: usize,
    /// Number of term words that found a match
    pub matched_terms: usize,
    /// Sum of per-word distances
    pub total_distance: usize,
    /// Insertion order of the quote in the index
    pub position: usize,
}

impl MatchScore {
    /// Score for a substring hit when fuzzy matching is off
    pub fn exact(position: usize) -> Self {
        Self {
            distance: 0,
            matched_terms: 1,
            total_distance: 0,
            position,
        }
    }

    /// Score derived from a token-level fuzzy match
    pub fn from_fuzzy(fuzzy_match: &FuzzyMatch, position: usize) -> Self {
        Self {
            distance: fuzzy_match.best_distance,
            matched_terms: fuzzy_match.matched_terms,
            total_distance: fuzzy_match.total_distance,
            position,
        }
    }

    pub fn is_exact(&self) -> bool {
        self.distance == 0
    }

    /// Closeness in (0, 1], 1.0 for exact matches, decreasing with distance
    pub fn relevance(&self) -> f64 {
        1.0 / (1.0 + self.distance as f64)
    }
}

impl Ord for MatchScore {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| self.matched_terms.cmp(&other.matched_terms))
            .then_with(|| other.total_distance.cmp(&self.total_distance))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for MatchScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort candidates most relevant first and keep the best `limit`
pub fn rank<T>(candidates: &mut Vec<(MatchScore, T)>, limit: usize) {
    if candidates.len() > limit && limit > 0 {
        candidates.select_nth_unstable_by(limit - 1, |a, b| b.0.cmp(&a.0));
    }
    candidates.truncate(limit);
    candidates.sort_unstable_by(|a, b| b.0.cmp(&a.0));
}
