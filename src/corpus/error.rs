use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Cannot read corpus file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corpus file {path} is not valid UTF-8 (line {line})")]
    InvalidUtf8 { path: PathBuf, line: usize },
}
