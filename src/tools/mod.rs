//! MCP tools implementation

pub mod parse;
pub mod random;
pub mod search;
pub mod stats;

use crate::config::Config;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::service::QuoteService;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::{timeout, Duration};

/// Upper bound on a single tool call
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// State shared by every tool call
#[derive(Clone)]
pub struct ToolContext {
    pub service: Arc<QuoteService>,
    /// Used when a search call leaves `maxHits` out
    pub default_max_hits: usize,
    /// Used when a search call leaves `maxEditDistance` out
    pub default_max_edit_distance: usize,
}

impl ToolContext {
    pub fn new(service: Arc<QuoteService>, config: &Config) -> Self {
        Self {
            service,
            default_max_hits: config.max_hits,
            default_max_edit_distance: config.max_edit_distance,
        }
    }
}

/// Run a tool under [`TOOL_TIMEOUT`] and turn its outcome into a response
pub(crate) async fn respond<F>(id: Option<Value>, tool: &str, call: F) -> McpResponse
where
    F: std::future::Future<Output = Result<ToolResult, AppError>>,
{
    match timeout(TOOL_TIMEOUT, call).await {
        Ok(Ok(content)) => match serde_json::to_value(content) {
            Ok(value) => McpResponse::success(id, value),
            Err(e) => McpResponse::error(id, "internal_error", &e.to_string()),
        },
        Ok(Err(e)) => McpResponse::error(id, e.error_code(), &e.message()),
        Err(_) => McpResponse::error(
            id,
            "timeout",
            &format!(
                "{} request exceeded {} second timeout",
                tool,
                TOOL_TIMEOUT.as_secs()
            ),
        ),
    }
}

/// Decode tool arguments, mapping failures to `invalid_input`
pub(crate) fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, AppError> {
    // Tools without parameters may be called with `null` arguments
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::search::SearchEngine;
    use crate::store::{MemoryStore, QuoteStore};

    pub const QUOTES: &[&str] = &[
        "Happiness is not something ready made. It comes from your own actions. -- Dalai Lama",
        "The only true wisdom is in knowing you know nothing. -- Socrates",
        "Knowledge is power. -- Francis Bacon",
        "Be yourself; everyone else is already taken. -- Oscar Wilde",
    ];

    /// A context whose store and index hold [`QUOTES`]
    pub fn context() -> ToolContext {
        let store = Arc::new(MemoryStore::new());
        let texts: Vec<String> = QUOTES.iter().map(|q| q.to_string()).collect();
        store.save_all(&texts).unwrap();

        let service = QuoteService::new(store, Arc::new(SearchEngine::new()));
        service.index_store().unwrap();
        ToolContext::new(Arc::new(service), &Config::default())
    }

    pub fn empty_context() -> ToolContext {
        let service = QuoteService::new(Arc::new(MemoryStore::new()), Arc::new(SearchEngine::new()));
        ToolContext::new(Arc::new(service), &Config::default())
    }
}
