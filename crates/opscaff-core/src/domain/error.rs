// ============================================================================
// domain/error.rs - PLUGIN RESOLUTION ERROR DOMAIN
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::domain::value_objects::{Version, VersionError};

/// Root domain error type.
///
/// All errors are:
/// - Cloneable and comparable (tests match on payloads)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid version {input:?}: {source}")]
    MalformedVersion {
        input: String,
        #[source]
        source: VersionError,
    },

    #[error("invalid plugin name {name:?}: {}", .reasons.join("; "))]
    InvalidName { name: String, reasons: Vec<String> },

    #[error("invalid plugin {key:?}: {reason}")]
    InvalidPlugin { key: String, reason: String },

    #[error("conflicting {field}: flag value {flag:?} differs from project file value {config:?}")]
    ConflictingInput {
        field: &'static str,
        flag: String,
        config: String,
    },

    // ========================================================================
    // Registry Construction Errors
    // ========================================================================
    #[error("two plugins have the same key: {key:?}")]
    DuplicateKey { key: String },

    #[error("bundle {bundle:?} members {members:?} share no supported project version")]
    NoCommonVersion {
        bundle: String,
        members: Vec<String>,
    },

    #[error("empty set of default plugins provided for project version {project_version}")]
    EmptyDefaults { project_version: Version },

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error(
        "plugin {key:?} does not support project version {project_version} (supported: {})",
        VersionList(.supported)
    )]
    UnsupportedProjectVersion {
        key: String,
        project_version: Version,
        supported: Vec<Version>,
    },

    #[error("ambiguous plugin {key:?} for project version {project_version}, possible plugins: {candidates:?}")]
    AmbiguousPlugin {
        key: String,
        project_version: Version,
        candidates: Vec<String>,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("unknown plugin {key:?}")]
    UnknownFullyQualifiedPlugin { key: String },

    #[error("no plugin matches {key:?} for project version {project_version}: {reason}, possible plugins: {candidates:?}")]
    NoMatchingPlugin {
        key: String,
        project_version: Version,
        reason: NoMatchReason,
        candidates: Vec<String>,
    },

    #[error(
        "no resolved plugin, please verify the project version and plugins specified in flags or configuration file"
    )]
    NoResolvedPlugin,

    #[error("resolved plugins do not provide any {subcommand} subcommand")]
    NoAvailablePlugin { subcommand: &'static str },
}

/// Which filter eliminated every candidate of a partial key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoMatchReason {
    /// No registered plugin carries the requested name.
    Names,
    /// Names matched but no plugin version (or project version) did.
    Versions,
}

impl fmt::Display for NoMatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Names => f.write_str("no names match"),
            Self::Versions => f.write_str("no versions match"),
        }
    }
}

struct VersionList<'a>(&'a [Version]);

impl fmt::Display for VersionList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, version) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{version}")?;
        }
        Ok(())
    }
}

impl DomainError {
    /// Convenience constructor for a failed [`Version::parse`].
    pub fn malformed_version(input: impl Into<String>, source: VersionError) -> Self {
        Self::MalformedVersion {
            input: input.into(),
            source,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedVersion { .. } => vec![
                "Versions look like 3, v4, 2-beta or v1-alpha".into(),
                "The number must be a positive integer without leading zeros".into(),
            ],
            Self::InvalidName { .. } => vec![
                "Plugin names must be lowercase RFC 1123 subdomains".into(),
                "Example: go.kubebuilder.io".into(),
            ],
            Self::ConflictingInput { field, .. } => vec![
                format!("The --{} flag disagrees with the PROJECT file", flag_for(field)),
                "Drop the flag to use the value recorded in the PROJECT file".into(),
            ],
            Self::UnsupportedProjectVersion { key, .. } => vec![
                format!("'{key}' cannot scaffold this project version"),
                "Try: opscaff plugins to see which project versions each plugin supports".into(),
            ],
            Self::AmbiguousPlugin { candidates, .. } => {
                let mut suggestions = vec!["Use a more specific plugin key, one of:".to_string()];
                suggestions.extend(candidates.iter().map(|c| format!("  • {c}")));
                suggestions
            }
            Self::UnknownFullyQualifiedPlugin { .. } | Self::NoMatchingPlugin { .. } => vec![
                "Try: opscaff plugins to list the registered plugins".into(),
                "Keys look like go.kubebuilder.io/v4, go/v4 or go".into(),
            ],
            Self::NoResolvedPlugin => vec![
                "Pass --plugins or run inside a project with a PROJECT file".into(),
                "Check that --project-version has default plugins".into(),
            ],
            Self::NoAvailablePlugin { subcommand } => vec![
                format!("None of the resolved plugins implement '{subcommand}'"),
                "Try: opscaff plugins to see plugin capabilities".into(),
            ],
            Self::DuplicateKey { .. }
            | Self::NoCommonVersion { .. }
            | Self::EmptyDefaults { .. }
            | Self::InvalidPlugin { .. } => vec![
                "The plugin catalogue is inconsistent".into(),
                "This is a bug in the plugin registration, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedVersion { .. }
            | Self::InvalidName { .. }
            | Self::ConflictingInput { .. }
            | Self::AmbiguousPlugin { .. } => ErrorCategory::Validation,
            Self::UnsupportedProjectVersion { .. } => ErrorCategory::Compatibility,
            Self::UnknownFullyQualifiedPlugin { .. }
            | Self::NoMatchingPlugin { .. }
            | Self::NoResolvedPlugin
            | Self::NoAvailablePlugin { .. } => ErrorCategory::NotFound,
            Self::DuplicateKey { .. }
            | Self::NoCommonVersion { .. }
            | Self::EmptyDefaults { .. }
            | Self::InvalidPlugin { .. } => ErrorCategory::Internal,
        }
    }
}

fn flag_for(field: &str) -> &str {
    match field {
        "project version" => "project-version",
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
