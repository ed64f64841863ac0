//! Application configuration
//!
//! Read from `<config dir>/quotes/config.json`. A missing file yields the
//! defaults; every field may be omitted. Command-line flags override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corpus file imported into an empty store at startup
    pub corpus_path: PathBuf,
    /// Results per search when the caller does not say
    pub max_hits: usize,
    /// Edit distance tolerance when the caller does not say
    pub max_edit_distance: usize,
    /// Optional wall-clock budget per search, in milliseconds
    pub search_budget_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("quotes.txt"),
            max_hits: 10,
            max_edit_distance: 2,
            search_budget_ms: None,
        }
    }
}

impl Config {
    pub fn search_budget(&self) -> Option<Duration> {
        self.search_budget_ms.map(Duration::from_millis)
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;

    Ok(config_dir.join("quotes").join("config.json"))
}

/// Load the configuration from its default location
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load the configuration from `path`, falling back to defaults if absent
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let data = fs::read_to_string(path).context("Failed to read config file")?;

    let config: Config = serde_json::from_str(&data).context("Failed to parse config file")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_hits, 10);
        assert_eq!(config.max_edit_distance, 2);
        assert!(config.search_budget().is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"corpus_path": "/data/zitate.txt", "search_budget_ms": 250}"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.corpus_path, PathBuf::from("/data/zitate.txt"));
        assert_eq!(config.max_hits, 10);
        assert_eq!(config.search_budget(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
