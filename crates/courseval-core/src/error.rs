//! Error types for the courseval core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the courseval crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum CoursevalError {
    /// Malformed entity handed to an index build. Fatal to the build; no
    /// index is created.
    #[error("invalid entity: {reason}")]
    InvalidEntity { reason: String },

    /// No entity matched a review's target subject query.
    #[error("no subject matches '{query}'")]
    SubjectNotFound { query: String },

    /// Review content exceeds the maximum length. The draft is unchanged.
    #[error("review content is {len} characters (max {max})")]
    ContentTooLong { len: usize, max: usize },

    /// An operation was invoked in the wrong lifecycle state.
    #[error("invalid operation '{operation}' in state '{state}'")]
    InvalidState { operation: String, state: String },

    /// The persistence sink rejected a record. `retryable` distinguishes
    /// transient failures (re-submit may succeed) from permanent ones.
    #[error("persistence failure (retryable: {retryable}): {message}")]
    Persistence { retryable: bool, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoursevalError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidEntity error
    pub fn invalid_entity(reason: impl Into<String>) -> Self {
        Self::InvalidEntity {
            reason: reason.into(),
        }
    }

    /// Creates a SubjectNotFound error
    pub fn subject_not_found(query: impl Into<String>) -> Self {
        Self::SubjectNotFound {
            query: query.into(),
        }
    }

    /// Creates a ContentTooLong error
    pub fn content_too_long(len: usize, max: usize) -> Self {
        Self::ContentTooLong { len, max }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(operation: impl Into<String>, state: impl ToString) -> Self {
        Self::InvalidState {
            operation: operation.into(),
            state: state.to_string(),
        }
    }

    /// Creates a Persistence error
    pub fn persistence(retryable: bool, message: impl Into<String>) -> Self {
        Self::Persistence {
            retryable,
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a SubjectNotFound error
    pub fn is_subject_not_found(&self) -> bool {
        matches!(self, Self::SubjectNotFound { .. })
    }

    /// Check if this is an InvalidState error
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }

    /// Check if this is a ContentTooLong error
    pub fn is_content_too_long(&self) -> bool {
        matches!(self, Self::ContentTooLong { .. })
    }

    /// Check if this is an InvalidEntity error
    pub fn is_invalid_entity(&self) -> bool {
        matches!(self, Self::InvalidEntity { .. })
    }

    /// True for persistence failures that are worth re-submitting.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence { retryable: true, .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CoursevalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CoursevalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CoursevalError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CoursevalError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (boundary loaders report opaque errors)
impl From<anyhow::Error> for CoursevalError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<String> for CoursevalError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, CoursevalError>`.
pub type Result<T> = std::result::Result<T, CoursevalError>;
