use thiserror::Error;

/// Rejected search parameters. Recoverable and meant to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("term too short")]
    TermTooShort { length: usize, min: usize },
    #[error("maxHits out of range")]
    MaxHitsOutOfRange { value: usize },
    #[error("maxEditDistance out of range")]
    MaxEditDistanceOutOfRange { value: usize },
}

impl ValidationError {
    /// Message including the offending value and the accepted range
    pub fn detail(&self) -> String {
        use super::query::{MAX_EDIT_DISTANCE, MAX_HITS_RANGE};

        match self {
            ValidationError::TermTooShort { length, min } => format!(
                "{}: {} characters, at least {} required",
                self, length, min
            ),
            ValidationError::MaxHitsOutOfRange { value } => format!(
                "{}: {} not in {}..={}",
                self,
                value,
                MAX_HITS_RANGE.start(),
                MAX_HITS_RANGE.end()
            ),
            ValidationError::MaxEditDistanceOutOfRange { value } => {
                format!("{}: {} not in 0..={}", self, value, MAX_EDIT_DISTANCE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::TermTooShort { length: 2, min: 4 };
        assert_eq!(error.to_string(), "term too short");
        assert_eq!(error.detail(), "term too short: 2 characters, at least 4 required");

        let error = ValidationError::MaxHitsOutOfRange { value: 501 };
        assert_eq!(error.to_string(), "maxHits out of range");
        assert_eq!(error.detail(), "maxHits out of range: 501 not in 1..=500");

        let error = ValidationError::MaxEditDistanceOutOfRange { value: 11 };
        assert_eq!(error.to_string(), "maxEditDistance out of range");
        assert_eq!(error.detail(), "maxEditDistance out of range: 11 not in 0..=10");
    }
}
