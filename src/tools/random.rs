//! Random quote tool implementation

use super::{parse_args, respond, ToolContext};
use crate::cli::RandomArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use serde_json::Value;

/// Text returned when the store holds no quotes
pub const NO_QUOTE: &str = "No quotes available.";

pub async fn handle_random(id: Option<Value>, args: Value, context: &ToolContext) -> McpResponse {
    respond(id, "Random", async {
        let random_args: RandomArgs = parse_args(args)?;
        execute_random(random_args, context).await
    })
    .await
}

/// Pick one quote uniformly at random. An empty store is not an error.
pub async fn execute_random(
    _random_args: RandomArgs,
    context: &ToolContext,
) -> Result<ToolResult, AppError> {
    let markdown = match context.service.random()? {
        Some(record) => match record.id {
            Some(id) => format!("> {}\n\n#{}\n", record.text, id),
            None => format!("> {}\n", record.text),
        },
        None => NO_QUOTE.to_string(),
    };
    Ok(ToolResult::text(markdown))
}
