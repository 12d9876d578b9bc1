//! Error types for the Serein core crate.

use thiserror::Error;

/// Errors produced by the task store, heuristics and rewrite providers.
#[derive(Error, Debug, Clone)]
pub enum TaskError {
    #[error("Task '{id}' not found")]
    TaskNotFound { id: i64 },

    #[error("Validation error: {reason}")]
    Validation { reason: String },

    #[error("Invalid status: '{status}'")]
    InvalidStatus { status: String },

    #[error("Invalid priority: '{priority}'")]
    InvalidPriority { priority: String },

    #[error("Storage error: {reason}")]
    Storage { reason: String },

    /// External rewrite capability failed. Callers are expected to recover
    /// with the local fallback rewrite instead of surfacing this to users.
    #[error("Rewrite service error: {reason}")]
    Upstream { reason: String },
}

impl TaskError {
    /// Shorthand for a validation failure.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Shorthand for an upstream rewrite failure.
    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::Upstream {
            reason: reason.into(),
        }
    }
}

impl From<rusqlite::Error> for TaskError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for core operations.
pub type TaskResult<T> = Result<T, TaskError>;
