//! Error types for eligibility, benefit and loading operations
//!
//! Every computation error is deterministic (bad input or missing data), so
//! nothing here is retried. Callers decide whether a failure aborts a single
//! contributor or the whole run.

use serde::Serialize;

use crate::contributor::Gender;
use crate::rules::Regime;

/// Coarse classification of a [`RetirementError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Caller supplied an argument outside the accepted domain
    InvalidArgument,
    /// A lookup had no matching entry
    NotFound,
}

/// Errors raised by the rule engine, the ledger and the survival tables
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetirementError {
    #[error("invalid gender '{0}': expected male or female")]
    InvalidGender(String),

    #[error("invalid contribution count {requested}: ledger holds {available}")]
    InvalidContributionCount { requested: usize, available: usize },

    #[error("insufficient contribution history: {required} months required, {available} recorded")]
    InsufficientHistory { required: usize, available: usize },

    #[error("birth date required by the {0} rule")]
    MissingBirthDate(Regime),

    #[error("invalid survival expectancy {value} at age {age}")]
    InvalidExpectancy { age: u32, value: f64 },

    #[error("no survival expectancy for {gender} at age {age}")]
    SurvivalNotFound { gender: Gender, age: i32 },

    #[error("invalid career configuration: {0}")]
    InvalidConfig(String),
}

impl RetirementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SurvivalNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidGender(_)
            | Self::InvalidContributionCount { .. }
            | Self::InsufficientHistory { .. }
            | Self::MissingBirthDate(_)
            | Self::InvalidExpectancy { .. }
            | Self::InvalidConfig(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// Convenience alias used throughout the library
pub type Result<T> = std::result::Result<T, RetirementError>;

/// Errors raised while reading survival tables, contributor histories or config files
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value '{value}' in column {column}")]
    Parse { column: &'static str, value: String },

    #[error(transparent)]
    Retirement(#[from] RetirementError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let missing = RetirementError::SurvivalNotFound { gender: Gender::Female, age: 130 };
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let short = RetirementError::InsufficientHistory { required: 36, available: 12 };
        assert_eq!(short.kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            short.to_string(),
            "insufficient contribution history: 36 months required, 12 recorded"
        );
    }
}
