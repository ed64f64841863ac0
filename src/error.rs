//! Error types and handling for the quotes server

use crate::corpus::ImportError;
use crate::search::ValidationError;
use crate::store::StoreError;
use serde::Serialize;
use std::fmt;

/// Application error types surfaced to CLI and MCP callers
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    ImportFailed(String),
    StoreFailed(String),
    Timeout(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::ImportFailed(msg) => write!(f, "Corpus import failed: {}", msg),
            AppError::StoreFailed(msg) => write!(f, "Quote store error: {}", msg),
            AppError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Get the error code for MCP responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::ImportFailed(_) => "import_failed",
            AppError::StoreFailed(_) => "store_failed",
            AppError::Timeout(_) => "timeout",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.detail())
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::ImportFailed(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::StoreFailed(err.to_string())
    }
}

/// Convert anyhow::Error to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert serde_json::Error to AppError
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validation_error_maps_to_invalid_input() {
        let err: AppError = ValidationError::TermTooShort { length: 2, min: 4 }.into();
        assert_eq!(err.error_code(), "invalid_input");
        assert_eq!(
            err.message(),
            "Invalid input: term too short: 2 characters, at least 4 required"
        );
    }

    #[test]
    fn test_import_error_maps_to_import_failed() {
        let err: AppError = ImportError::InvalidUtf8 {
            path: PathBuf::from("q.txt"),
            line: 1,
        }
        .into();
        assert_eq!(err.error_code(), "import_failed");
        assert!(err.message().starts_with("Corpus import failed:"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Timeout("x".into()).error_code(), "timeout");
        assert_eq!(AppError::StoreFailed("x".into()).error_code(), "store_failed");
        assert_eq!(AppError::Internal("x".into()).error_code(), "internal_error");
    }
}
