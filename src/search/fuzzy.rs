//! Fuzzy Matching Engine
//!
//! Token-level approximate matching with a bounded Levenshtein distance.
//! Quote texts and search terms are split into Unicode words, NFC-normalized
//! and lowercased before comparison. The distance computation gives up as
//! soon as the tolerance can no longer be met, so a query costs at most
//! `O(term length * token length)` per candidate token and usually far less.

use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// A word of a quote, kept in its displayed form and its folded form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Word as it appears in the (NFC-normalized) quote
    pub original: String,
    /// Lowercased characters used for distance computation
    pub folded: Box<[char]>,
}

impl Token {
    fn new(word: &str) -> Self {
        Self {
            original: word.to_string(),
            folded: fold(word).chars().collect(),
        }
    }
}

/// Outcome of matching one quote against a term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// Smallest distance of any matched term word
    pub best_distance: usize,
    /// Number of term words that matched some quote word
    pub matched_terms: usize,
    /// Sum of the distances of the matched term words
    pub total_distance: usize,
    /// Quote words (displayed form) that matched, in quote order, deduplicated
    pub matched_tokens: Vec<String>,
}

/// Split text into word tokens
pub fn tokenize(text: &str) -> Vec<Token> {
    let normalized = normalize_for_matching(text);
    normalized.unicode_words().map(Token::new).collect()
}

/// Matcher for one search term at one tolerance
pub struct FuzzyMatcher {
    term_words: Vec<Box<[char]>>,
    max_edit_distance: usize,
}

impl FuzzyMatcher {
    /// Prepare a matcher. A term without any word characters is matched as a
    /// single token.
    pub fn new(term: &str, max_edit_distance: usize) -> Self {
        let normalized = normalize_for_matching(term.trim());
        let mut term_words: Vec<Box<[char]>> = normalized
            .unicode_words()
            .map(|w| fold(w).chars().collect())
            .collect();

        if term_words.is_empty() {
            term_words.push(fold(&normalized).chars().collect());
        }

        let mut seen = HashSet::new();
        term_words.retain(|w| seen.insert(w.clone()));

        Self {
            term_words,
            max_edit_distance,
        }
    }

    /// Match a tokenized quote. Returns `None` unless at least one term word
    /// is within tolerance of some quote word.
    pub fn match_tokens(&self, tokens: &[Token]) -> Option<FuzzyMatch> {
        let mut best_distance = usize::MAX;
        let mut matched_terms = 0;
        let mut total_distance = 0;
        let mut hit_tokens = vec![false; tokens.len()];

        for word in &self.term_words {
            let mut word_best: Option<usize> = None;

            for (idx, token) in tokens.iter().enumerate() {
                if let Some(d) = bounded_levenshtein(word, &token.folded, self.max_edit_distance) {
                    hit_tokens[idx] = true;
                    if word_best.map_or(true, |best| d < best) {
                        word_best = Some(d);
                    }
                }
            }

            if let Some(d) = word_best {
                matched_terms += 1;
                total_distance += d;
                best_distance = best_distance.min(d);
            }
        }

        if matched_terms == 0 {
            return None;
        }

        let mut matched_tokens: Vec<String> = Vec::new();
        for (token, hit) in tokens.iter().zip(hit_tokens) {
            if hit && !matched_tokens.contains(&token.original) {
                matched_tokens.push(token.original.clone());
            }
        }

        Some(FuzzyMatch {
            best_distance,
            matched_terms,
            total_distance,
            matched_tokens,
        })
    }
}

/// Case-sensitive substring check used when fuzzy matching is off
pub fn exact_match(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    haystack.contains(needle)
}

/// Levenshtein distance between `a` and `b` if it is at most `max`.
///
/// Insertions, deletions and substitutions cost 1. Returns `None` as soon as
/// the length difference, or the smallest value of a DP row, exceeds `max`.
pub fn bounded_levenshtein(a: &[char], b: &[char], max: usize) -> Option<usize> {
    if a.len().abs_diff(b.len()) > max {
        return None;
    }
    if a.is_empty() {
        return Some(b.len());
    }
    if b.is_empty() {
        return Some(a.len());
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        let mut row_min = curr[0];

        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            curr[j + 1] = substitution.min(deletion).min(insertion);
            row_min = row_min.min(curr[j + 1]);
        }

        if row_min > max {
            return None;
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[b.len()];
    (distance <= max).then_some(distance)
}

/// Unicode NFC normalization, so composed and decomposed input compare equal
fn normalize_for_matching(text: &str) -> String {
    text.nfc().collect::<String>()
}

fn fold(word: &str) -> String {
    word.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn distance(a: &str, b: &str, max: usize) -> Option<usize> {
        bounded_levenshtein(&chars(a), &chars(b), max)
    }

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(distance("kitten", "sitting", 5), Some(3));
        assert_eq!(distance("hapiness", "happiness", 2), Some(1));
        assert_eq!(distance("same", "same", 0), Some(0));
        assert_eq!(distance("", "abc", 3), Some(3));
        assert_eq!(distance("abc", "", 3), Some(3));
    }

    #[test]
    fn test_levenshtein_bound() {
        assert_eq!(distance("kitten", "sitting", 2), None);
        assert_eq!(distance("hapiness", "happening", 2), None);
        // Length difference alone exceeds the bound
        assert_eq!(distance("abc", "abcdefgh", 4), None);
        assert_eq!(distance("", "abc", 2), None);
    }

    #[test]
    fn test_levenshtein_unicode() {
        assert_eq!(distance("straße", "strasse", 2), Some(2));
        assert_eq!(distance("café", "cafe", 1), Some(1));
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokens = tokenize("\"Brevity is the soul of wit.\" -- Shakespeare");
        let words: Vec<&str> = tokens.iter().map(|t| t.original.as_str()).collect();
        assert_eq!(
            words,
            vec!["Brevity", "is", "the", "soul", "of", "wit", "Shakespeare"]
        );
        assert_eq!(tokens[0].folded.iter().collect::<String>(), "brevity");
    }

    #[test]
    fn test_tokenize_normalizes_unicode() {
        // "e" followed by a combining acute accent
        let tokens = tokenize("cafe\u{301}");
        assert_eq!(tokens[0].original, "café");
    }

    #[test]
    fn test_match_tokens_fuzzy() {
        let matcher = FuzzyMatcher::new("hapiness", 2);
        let tokens = tokenize("The pursuit of Happiness is a right.");

        let m = matcher.match_tokens(&tokens).expect("should match");
        assert_eq!(m.best_distance, 1);
        assert_eq!(m.matched_terms, 1);
        assert_eq!(m.matched_tokens, vec!["Happiness".to_string()]);
    }

    #[test]
    fn test_match_tokens_out_of_tolerance() {
        let matcher = FuzzyMatcher::new("hapiness", 2);
        let tokens = tokenize("Something is happening here.");
        assert!(matcher.match_tokens(&tokens).is_none());
    }

    #[test]
    fn test_match_tokens_multi_word_term() {
        let matcher = FuzzyMatcher::new("sould wit", 1);
        let tokens = tokenize("Brevity is the soul of wit.");

        let m = matcher.match_tokens(&tokens).expect("should match");
        assert_eq!(m.best_distance, 0);
        assert_eq!(m.matched_terms, 2);
        assert_eq!(m.total_distance, 1);
        assert_eq!(m.matched_tokens, vec!["soul".to_string(), "wit".to_string()]);
    }

    #[test]
    fn test_matcher_falls_back_to_whole_term() {
        let matcher = FuzzyMatcher::new("!!!!", 1);
        assert!(matcher.match_tokens(&tokenize("no punctuation words")).is_none());
    }

    #[test]
    fn test_exact_match_is_case_sensitive_substring() {
        assert!(exact_match("the cat sat", "cat"));
        assert!(exact_match("concatenate", "cat"));
        assert!(!exact_match("The Cat sat", "cat"));
        assert!(!exact_match("the bat sat", "cat"));
        assert!(!exact_match("anything", ""));
    }
}
