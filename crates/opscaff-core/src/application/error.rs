//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The project file exists but could not be read or understood.
    #[error("Cannot read project file {path}: {reason}")]
    ProjectFile { path: PathBuf, reason: String },

    /// A plugin key asked for by the user is not registered.
    #[error("Plugin not found: {key}")]
    PluginNotFound { key: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectFile { path, .. } => vec![
                format!("Check the contents of {}", path.display()),
                "The file needs a 'version' field and an optional 'layout'".into(),
                "Or point --project-file at another file".into(),
            ],
            Self::PluginNotFound { .. } => vec![
                "Try: opscaff plugins to list the registered plugins".into(),
                "Use the fully-qualified key, e.g. go.kubebuilder.io/v4".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectFile { .. } => ErrorCategory::Configuration,
            Self::PluginNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
