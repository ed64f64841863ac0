//! quotes MCP Server & CLI (Rust)
//!
//! Dual-mode application:
//! - MCP Server Mode (default): Model Context Protocol server using stdio
//! - CLI Mode: Command-line utility for direct tool execution
//!
//! Implements four tools:
//! - `search(term, maxHits, maxEditDistance)` - Fuzzy search over the quotes
//! - `random()` - One quote chosen uniformly at random
//! - `stats()` - Store and index sizes
//! - `parse(file)` - Split a corpus file into quotes without importing it

mod cli;
mod config;
mod corpus;
mod error;
mod mcp;
mod model;
mod search;
mod service;
mod store;
mod tools;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::AppError;
use service::QuoteService;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::timeout;
use tools::{ToolContext, TOOL_TIMEOUT};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, MCP server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        // CLI mode - parse arguments and execute
        run_cli_mode().await
    } else {
        // MCP server mode - default behavior
        run_mcp_mode().await
    }
}

/// Load the config file and apply the corpus override
fn load_settings(corpus: Option<PathBuf>) -> Result<Config> {
    let mut config = config::load_config()?;
    if let Some(path) = corpus {
        config.corpus_path = path;
    }
    Ok(config)
}

/// Import the configured corpus into the service, off the async workers
async fn import(service: Arc<QuoteService>, config: &Config) -> Result<(), AppError> {
    let corpus_path = config.corpus_path.clone();
    let (import, index) = tokio::task::spawn_blocking(move || service.import_corpus(&corpus_path))
        .await
        .map_err(|e| AppError::Internal(format!("Import task failed: {}", e)))??;

    info!(
        "Corpus ready: {} quotes stored, {} indexed",
        import.total, index.total
    );
    Ok(())
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let Some(command) = cli.command else {
        eprintln!("Error: No command specified. Use --help for usage information.");
        std::process::exit(1);
    };

    let config = load_settings(cli.corpus)?;
    let service = Arc::new(QuoteService::from_config(&config));
    let context = ToolContext::new(service.clone(), &config);

    // Execute command
    let result = match command {
        Commands::Search(args) => match import(service, &config).await {
            Ok(()) => run_tool(tools::search::execute_search(args, &context)).await,
            Err(e) => Err(e),
        },
        Commands::Random(args) => match import(service, &config).await {
            Ok(()) => run_tool(tools::random::execute_random(args, &context)).await,
            Err(e) => Err(e),
        },
        Commands::Stats(args) => match import(service, &config).await {
            Ok(()) => run_tool(tools::stats::execute_stats(args, &context)).await,
            Err(e) => Err(e),
        },
        Commands::Parse(args) => run_tool(tools::parse::execute_parse(args, &context)).await,
    };

    // Handle result and exit with appropriate code
    match result {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Run a tool in CLI mode and extract its markdown text
async fn run_tool<F>(call: F) -> Result<String, AppError>
where
    F: std::future::Future<Output = Result<mcp::ToolResult, AppError>>,
{
    match timeout(TOOL_TIMEOUT, call).await {
        Ok(Ok(tool_result)) => Ok(tool_result
            .content
            .first()
            .map(|c| c.text.clone())
            .unwrap_or_default()),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(AppError::Timeout(format!(
            "Request exceeded {} second timeout",
            TOOL_TIMEOUT.as_secs()
        ))),
    }
}

/// Map AppError to exit code
fn get_exit_code(err: &AppError) -> i32 {
    match err {
        AppError::InvalidInput(_) => 1, // Invalid arguments or usage error
        AppError::ImportFailed(_) => 2, // Corpus could not be read
        AppError::StoreFailed(_) => 3,
        AppError::Timeout(_) => 4,
        AppError::Internal(_) => 5,
    }
}

/// Run in MCP server mode
async fn run_mcp_mode() -> Result<()> {
    // stdout carries JSON-RPC, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting quotes MCP Server");

    let config = load_settings(std::env::var_os("QUOTES_CORPUS").map(PathBuf::from))?;
    let service = Arc::new(QuoteService::from_config(&config));
    let context = mcp::ServerContext::new(ToolContext::new(service.clone(), &config));

    // Queries are answered from the empty index until the import publishes
    let import_config = config.clone();
    tokio::spawn(async move {
        if let Err(e) = import(service, &import_config).await {
            error!("Corpus import failed: {}", e);
        }
    });

    // Handle stdio MCP communication
    mcp::handle_stdio(context).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(get_exit_code(&AppError::InvalidInput("x".into())), 1);
        assert_eq!(get_exit_code(&AppError::ImportFailed("x".into())), 2);
        assert_eq!(get_exit_code(&AppError::Timeout("x".into())), 4);
        assert_eq!(get_exit_code(&AppError::Internal("x".into())), 5);
    }

    #[tokio::test]
    async fn test_run_tool_extracts_text() {
        let text = run_tool(async { Ok(mcp::ToolResult::text("hello")) })
            .await
            .unwrap();
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn test_import_missing_corpus_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            corpus_path: dir.path().join("none.txt"),
            ..Config::default()
        };
        let service = Arc::new(QuoteService::from_config(&config));

        import(service.clone(), &config).await.unwrap();
        assert_eq!(service.stats().unwrap().stored, 0);
    }
}
