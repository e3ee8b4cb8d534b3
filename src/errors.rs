use std::fmt;

use thiserror::Error;

/// A single field that failed ledger validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldIssue {
    /// The date could not be parsed as a calendar date.
    Date(String),
    /// The amount was non-numeric, fractional or negative.
    Amount(String),
    /// The item name is blank (submission only).
    EmptyItem,
    /// The amount is zero (submission only).
    NonPositiveAmount,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldIssue::Date(raw) => write!(f, "date `{}` is not a calendar date", raw),
            FieldIssue::Amount(raw) => write!(f, "amount `{}` is not a whole yen value", raw),
            FieldIssue::EmptyItem => f.write_str("item name is empty"),
            FieldIssue::NonPositiveAmount => f.write_str("amount must be greater than zero"),
        }
    }
}

/// Malformed ledger input, listing every field that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid expense: {}", join_issues(.issues))]
pub struct ValidationFailure {
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn new(issues: Vec<FieldIssue>) -> Self {
        Self { issues }
    }

    pub fn contains(&self, issue: &FieldIssue) -> bool {
        self.issues.iter().any(|candidate| candidate == issue)
    }

    pub fn cites_empty_item(&self) -> bool {
        self.contains(&FieldIssue::EmptyItem)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The AI receipt response could not be turned into a suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("response was empty")]
    Empty,
    #[error("response is not valid JSON: {0}")]
    Malformed(String),
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("response is missing the `{0}` key")]
    MissingKey(&'static str),
    #[error("`{0}` has the wrong type")]
    WrongType(&'static str),
}

/// The budget cell held nothing usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigMissing {
    #[error("budget cell is empty")]
    Empty,
    #[error("budget cell value `{0}` is not a whole yen amount")]
    Unparseable(String),
}

/// Transport-level failure reported by a row or budget store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Unavailable(String),
    #[error("sheet header has no `{0}` column")]
    MissingColumn(String),
}

/// Failure reported by the external receipt analyzer.
#[derive(Debug, Error)]
#[error("receipt analyzer unavailable: {0}")]
pub struct AnalyzerError(pub String);

/// Error type that captures every ledger failure surfaced to callers.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("could not read receipt, enter manually ({0})")]
    Parse(#[from] ParseFailure),
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    #[error("budget not configured: {0}")]
    ConfigMissing(#[from] ConfigMissing),
    #[error(transparent)]
    AnalyzerUnavailable(#[from] AnalyzerError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Whether the user can recover by retrying or entering data manually.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, LedgerError::StoreUnavailable(_) | LedgerError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failure_lists_every_issue() {
        let failure = ValidationFailure::new(vec![
            FieldIssue::EmptyItem,
            FieldIssue::NonPositiveAmount,
        ]);
        let message = failure.to_string();
        assert!(message.contains("item name is empty"), "{message}");
        assert!(message.contains("greater than zero"), "{message}");
        assert!(failure.cites_empty_item());
    }

    #[test]
    fn store_failures_are_not_recoverable() {
        let err = LedgerError::from(StoreError::Unavailable("sheet offline".into()));
        assert!(!err.is_recoverable());
        let err = LedgerError::from(ParseFailure::NotAnObject);
        assert!(err.is_recoverable());
    }
}
