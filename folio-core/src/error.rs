//! Global error types for the portfolio backend.
//!
//! All error categories across the application are unified into a single
//! `FolioError` enum with conversions from underlying library errors.
//! Validation failures carry the full list of violated constraints so
//! clients see every problem with a submission at once, not just the first.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Convenience type alias for Results using FolioError.
pub type FolioResult<T> = Result<T, FolioError>;

/// A single violated constraint on an input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    /// Build a field error from anything string-like.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Unified error type covering all error categories in the backend.
#[derive(Error, Debug)]
pub enum FolioError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Input errors --
    /// One or more input constraints were violated. Collects every
    /// violation, not just the first.
    #[error("validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// An update carried fields but produced an identical document.
    #[error("no changes made")]
    NoChange,

    // -- Store errors --
    /// The document store rejected an operation or is unreachable.
    #[error("storage error: {0}")]
    Storage(String),

    /// A store operation exceeded its time bound.
    #[error("store timeout: {0}")]
    Timeout(String),

    /// A lookup key matched no document.
    #[error("{0} not found")]
    NotFound(String),

    // -- Generic --
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    /// Whether this error is the caller's fault (maps to a 4xx response).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FolioError::Validation(_) | FolioError::NoChange | FolioError::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        FolioError::Serialization(e.to_string())
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let err = FieldError::new("email", "must be a valid email address");
        assert_eq!(err.to_string(), "email: must be a valid email address");
    }

    #[test]
    fn test_validation_display_lists_every_violation() {
        let err = FolioError::Validation(vec![
            FieldError::new("name", "must not be empty"),
            FieldError::new("message", "must be at most 2000 characters"),
        ]);
        let text = err.to_string();
        assert!(text.contains("name: must not be empty"));
        assert!(text.contains("message: must be at most 2000 characters"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(FolioError::NotFound("contact".into()).is_client_error());
        assert!(FolioError::NoChange.is_client_error());
        assert!(FolioError::Validation(vec![]).is_client_error());
        assert!(!FolioError::Storage("down".into()).is_client_error());
        assert!(!FolioError::Timeout("slow".into()).is_client_error());
    }

    #[test]
    fn test_not_found_display() {
        let err = FolioError::NotFound("blog post".into());
        assert_eq!(err.to_string(), "blog post not found");
    }
}
