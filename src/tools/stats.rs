//! Stats tool implementation

use super::{parse_args, respond, ToolContext};
use crate::cli::StatsArgs;
use crate::error::AppError;
use crate::mcp::{ContentItem, McpResponse, ToolResult};
use serde_json::Value;

pub async fn handle_stats(id: Option<Value>, args: Value, context: &ToolContext) -> McpResponse {
    respond(id, "Stats", async {
        let stats_args: StatsArgs = parse_args(args)?;
        execute_stats(stats_args, context).await
    })
    .await
}

/// Report store and index sizes, as text plus structured metadata
pub async fn execute_stats(
    _stats_args: StatsArgs,
    context: &ToolContext,
) -> Result<ToolResult, AppError> {
    let stats = context.service.stats()?;

    let text = format!(
        "Stored quotes: {}\nIndexed quotes: {}\nIndex version: {}\n",
        stats.stored, stats.indexed, stats.index_version
    );
    let item = ContentItem::with_metadata(text, serde_json::to_value(&stats)?);

    Ok(ToolResult::from_items(vec![item]))
}
