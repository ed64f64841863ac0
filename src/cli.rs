//! CLI mode implementation
//!
//! Provides command-line interface for the quote tools

use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quotes CLI
#[derive(Parser)]
#[command(name = "quotes")]
#[command(about = "Quotation corpus with fuzzy search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Corpus file to import (overrides the config file)
    #[arg(short = 'c', long, global = true, env = "QUOTES_CORPUS")]
    pub corpus: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fuzzy search for quotes
    Search(SearchArgs),
    /// Show a random quote
    Random(RandomArgs),
    /// Show store and index sizes
    Stats(StatsArgs),
    /// Split a corpus file into quotes without importing it
    Parse(ParseArgs),
}

/// Search tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    /// Search term, at least 4 characters after trimming
    #[arg(short = 't', long)]
    #[schemars(description = "Search term, at least 4 characters after trimming")]
    pub term: String,

    /// Maximum number of quotes to return (1-500, default 10)
    #[arg(short = 'n', long)]
    #[schemars(description = "Maximum number of quotes to return (1-500, default 10)")]
    pub max_hits: Option<usize>,

    /// Maximum edit distance (0-10, default 2); 0 turns fuzzy matching off
    #[arg(short = 'd', long)]
    #[schemars(description = "Maximum edit distance (0-10, default 2); 0 turns fuzzy matching off")]
    pub max_edit_distance: Option<usize>,
}

/// Random quote tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct RandomArgs {}

/// Stats tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug, Default)]
pub struct StatsArgs {}

/// Parse tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct ParseArgs {
    /// Corpus file to split into quotes
    #[arg(short = 'f', long)]
    #[schemars(description = "Corpus file to split into quotes")]
    pub file: PathBuf,
}
