//! Parse tool implementation
//!
//! Splits a corpus file into quotes without importing it, so a corpus can be
//! checked before it is used.

use super::{parse_args, respond, ToolContext};
use crate::cli::ParseArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use serde_json::Value;
use tracing::info;

pub async fn handle_parse(id: Option<Value>, args: Value, context: &ToolContext) -> McpResponse {
    respond(id, "Parse", async {
        let parse_args: ParseArgs = parse_args(args)?;
        execute_parse(parse_args, context).await
    })
    .await
}

pub async fn execute_parse(
    parse_args: ParseArgs,
    context: &ToolContext,
) -> Result<ToolResult, AppError> {
    let service = context.service.clone();
    let path = parse_args.file.clone();
    let quotes = tokio::task::spawn_blocking(move || service.parse_corpus_file(&path))
        .await
        .map_err(|e| AppError::Internal(format!("Parse task failed: {}", e)))??;

    info!("Parsed {} quotes from {}", quotes.len(), parse_args.file.display());

    let mut md = format!(
        "# {} · {} quotes\n\n",
        parse_args.file.display(),
        quotes.len()
    );
    for (n, quote) in quotes.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", n + 1, quote.trim()));
    }

    Ok(ToolResult::text(md))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::fixtures;
    use serde_json::json;
    use std::io::Write;

    #[tokio::test]
    async fn test_parse_lists_quotes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"To be or \nnot to be.\n.\nBrevity is the soul of wit.\n")
            .unwrap();

        let context = fixtures::empty_context();
        let args = ParseArgs {
            file: file.path().to_path_buf(),
        };
        let result = execute_parse(args, &context).await.unwrap();

        let text = &result.content[0].text;
        assert!(text.contains("· 2 quotes"));
        assert!(text.contains("1. To be or not to be."));
        assert!(text.contains("2. Brevity is the soul of wit."));
        // Nothing was imported
        assert_eq!(context.service.stats().unwrap().stored, 0);
    }

    #[tokio::test]
    async fn test_parse_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let context = fixtures::empty_context();
        let resp = handle_parse(
            Some(json!(1)),
            json!({"file": dir.path().join("missing.txt")}),
            &context,
        )
        .await;

        let err = resp.error.expect("error present");
        assert_eq!(err.code, "import_failed");
    }
}
