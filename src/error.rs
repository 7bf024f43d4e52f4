//! Custom error types for PiggyBank
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for PiggyBank operations
#[derive(Error, Debug)]
pub enum PiggyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Bytes that do not decode as a ledger document
    #[error("Could not decode ledger data: {0}")]
    Decode(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Amount rejected by a deposit or withdrawal
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Backup requested while the ledger has no accounts
    #[error("Nothing to back up: the ledger has no accounts")]
    EmptyLedger,

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("Duplicate {entity_type}: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PiggyError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an amount rejection
    pub fn is_invalid_amount(&self) -> bool {
        matches!(self, Self::InvalidAmount(_))
    }
}

impl From<std::io::Error> for PiggyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PiggyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for PiggyBank operations
pub type PiggyResult<T> = Result<T, PiggyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PiggyError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PiggyError::account_not_found("Alice");
        assert_eq!(err.to_string(), "Account not found: Alice");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_empty_ledger_message() {
        let err = PiggyError::EmptyLedger;
        assert!(err.to_string().contains("no accounts"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PiggyError = io_err.into();
        assert!(matches!(err, PiggyError::Io(_)));
    }
}
