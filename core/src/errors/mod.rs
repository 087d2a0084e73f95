//! Domain-specific error types and error handling.

mod types;


// Re-export all error types and utilities
pub use types::{CarrierError, FailureReason};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A backing store (prefix table, verification table) could not be read
    /// or written
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// More than one prefix row shares the same exact prefix
    #[error("Ambiguous prefix {prefix}: {candidates} records share it")]
    AmbiguousPrefix { prefix: String, candidates: usize },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Failure reason reported on an outcome built from this error
    pub fn failure_reason(&self) -> FailureReason {
        match self {
            DomainError::Validation { .. } => FailureReason::InvalidInput,
            DomainError::AmbiguousPrefix { .. } => FailureReason::AmbiguousPrefix,
            DomainError::NotFound { .. } => FailureReason::PrefixNotFound,
            DomainError::Storage { .. } | DomainError::Internal { .. } => {
                FailureReason::InternalError
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
