//! Search tool implementation
//!
//! Implements the `search(term, maxHits, maxEditDistance)` MCP tool

use super::{parse_args, respond, ToolContext};
use crate::cli::SearchArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::search::MatchResult;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Format search results into markdown for display (used by MCP and CLI)
pub fn format_search_results(results: &MatchResult, term: &str, exact: bool) -> String {
    let mut md = String::new();
    md.push_str(&format!(
        "# Search Results · {} quotes for \"{}\"\n\n",
        results.len(),
        term
    ));
    if results.truncated {
        md.push_str("_Search time budget ran out; results are partial._\n\n");
    }

    for result in results.iter() {
        let id = result
            .record
            .id
            .map(|id| format!("#{}", id))
            .unwrap_or_else(|| "#?".to_string());
        let quality = if result.score.is_exact() {
            "exact".to_string()
        } else {
            format!("distance {}", result.score.distance)
        };
        md.push_str(&format!(
            "{} · {} · relevance {:.2}\n\n",
            id,
            quality,
            result.score.relevance()
        ));

        md.push_str(&format!(
            "> {}\n\n",
            highlight(&result.record.text, &result.matched_terms, exact)
        ));

        md.push_str("---\n\n");
    }

    md
}

/// Wrap every occurrence of the matched terms in `**bold**`.
///
/// Exact searches highlight substrings. Fuzzy searches highlight whole words
/// whose normalized form is one of the matched words.
fn highlight(text: &str, matched: &[String], exact: bool) -> String {
    if matched.is_empty() {
        return text.to_string();
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    if exact {
        for term in matched.iter().filter(|t| !t.is_empty()) {
            ranges.extend(
                text.match_indices(term.as_str())
                    .map(|(start, m)| (start, start + m.len())),
            );
        }
    } else {
        let words: HashSet<&str> = matched.iter().map(String::as_str).collect();
        for (start, word) in text.unicode_word_indices() {
            let normalized: String = word.nfc().collect();
            if words.contains(normalized.as_str()) {
                ranges.push((start, start + word.len()));
            }
        }
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    // Merge overlapping and adjacent ranges
    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        match merged.last_mut() {
            Some(last) if s <= last.1 => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }

    let mut res = String::with_capacity(text.len() + merged.len() * 4);
    let mut last_idx = 0usize;
    for (s, e) in merged {
        res.push_str(&text[last_idx..s]);
        res.push_str("**");
        res.push_str(&text[s..e]);
        res.push_str("**");
        last_idx = e;
    }
    res.push_str(&text[last_idx..]);

    res
}

/// Handle search tool call (MCP)
pub async fn handle_search(id: Option<Value>, args: Value, context: &ToolContext) -> McpResponse {
    respond(id, "Search", async {
        let search_args: SearchArgs = parse_args(args)?;
        execute_search(search_args, context).await
    })
    .await
}

/// Shared implementation for search (used by MCP and CLI)
pub async fn execute_search(
    search_args: SearchArgs,
    context: &ToolContext,
) -> Result<ToolResult, AppError> {
    let max_hits = search_args.max_hits.unwrap_or(context.default_max_hits);
    let max_edit_distance = search_args
        .max_edit_distance
        .unwrap_or(context.default_max_edit_distance);

    debug!(
        "Search request: '{}' (max hits {}, max edit distance {})",
        search_args.term, max_hits, max_edit_distance
    );

    // Scanning is CPU-bound; keep it off the async workers
    let service = context.service.clone();
    let term = search_args.term.clone();
    let results = tokio::task::spawn_blocking(move || service.search(&term, max_hits, max_edit_distance))
        .await
        .map_err(|e| AppError::Internal(format!("Search task failed: {}", e)))??;

    let markdown = format_search_results(&results, search_args.term.trim(), max_edit_distance == 0);
    Ok(ToolResult::text(markdown))
}
