//! Unified error handling for opscaff core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for opscaff core operations.
#[derive(Debug, Error, Clone)]
pub enum OpscaffError {
    /// Errors from the domain layer (resolution and validation rules).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl OpscaffError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Try: opscaff config list to inspect the effective configuration".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in opscaff".into(),
                "Re-run with -vv and include the output when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    Internal,
}

impl From<crate::domain::ErrorCategory> for ErrorCategory {
    fn from(category: crate::domain::ErrorCategory) -> Self {
        use crate::domain::ErrorCategory as Domain;
        match category {
            Domain::Validation => Self::Validation,
            Domain::Compatibility => Self::Compatibility,
            Domain::NotFound => Self::NotFound,
            Domain::Internal => Self::Internal,
        }
    }
}

/// Convenient result type alias.
pub type OpscaffResult<T> = Result<T, OpscaffError>;
