//! Custom error types for ledgerdesk
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::services::validation::ValidationIssue;

/// The main error type for ledgerdesk operations
#[derive(Error, Debug)]
pub enum LedgerDeskError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Network or HTTP failure while talking to the backend.
    ///
    /// `status` is `None` when the request never produced a response.
    #[error("{}", format_transfer(.status, .message))]
    Transfer {
        status: Option<u16>,
        message: String,
    },

    /// A journal entry was refused before it left the client
    #[error("Journal entry rejected: {}", format_issues(.0))]
    Rejected(Vec<ValidationIssue>),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed payload returned by the backend
    #[error("Parse error: {0}")]
    Parse(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

fn format_transfer(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Transfer failed: {} - {}", code, message),
        None => format!("Transfer failed: {}", message),
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LedgerDeskError {
    /// Create a transfer error from a non-success HTTP status and its body text
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::Transfer {
            status: Some(status),
            message: body.into(),
        }
    }

    /// Create a transfer error for a failure that produced no response
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transfer {
            status: None,
            message: message.into(),
        }
    }

    /// Create a "not found" error for journal entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Journal entry",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for ledger accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// HTTP status carried by a transfer error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transfer { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this is a transfer error
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (including rejected entries)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Rejected(_))
    }
}

impl From<std::io::Error> for LedgerDeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerDeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for LedgerDeskError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transfer {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type alias for ledgerdesk operations
pub type LedgerDeskResult<T> = Result<T, LedgerDeskError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_error_display() {
        let err = LedgerDeskError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_transfer_display_with_status() {
        let err = LedgerDeskError::http_status(404, "No such key");
        assert_eq!(err.to_string(), "Transfer failed: 404 - No such key");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_transfer());
    }

    #[test]
    fn test_transfer_display_without_status() {
        let err = LedgerDeskError::network("connection refused");
        assert_eq!(err.to_string(), "Transfer failed: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_rejected_lists_every_reason() {
        let err = LedgerDeskError::Rejected(vec![
            ValidationIssue::MissingReference,
            ValidationIssue::Unbalanced {
                total_debit: Money::from_cents(10_000),
                total_credit: Money::from_cents(5_000),
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("Reference is required"));
        assert!(text.contains("out of balance by 50.00"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_found_error() {
        let err = LedgerDeskError::entry_not_found("JE-7");
        assert_eq!(err.to_string(), "Journal entry not found: JE-7");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LedgerDeskError = io_err.into();
        assert!(matches!(err, LedgerDeskError::Io(_)));
    }
}
