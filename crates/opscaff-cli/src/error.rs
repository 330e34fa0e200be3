//! CLI error type, its exit codes, and how it is reported on stderr.

use std::error::Error as StdError;
use std::fmt;
use std::io;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use opscaff_core::error::{ErrorCategory as CoreCategory, OpscaffError};

pub type CliResult<T> = Result<T, CliError>;

type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A flag value clap accepted but opscaff cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The config file or `OPSCAFF_*` environment is unusable.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Resolution or catalogue failure from `opscaff-core`.
    #[error("{0}")]
    Core(#[from] OpscaffError),

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode JSON output")]
    Json(#[from] serde_json::Error),
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Io {
            context: "Failed to write output".into(),
            source,
        }
    }
}

impl CliError {
    pub fn config(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::ConfigError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => vec!["Run with --help to see accepted values".into()],
            Self::ConfigError { .. } => vec![
                "Show the file in use: opscaff config path".into(),
                "Start over with: opscaff config init --force".into(),
            ],
            Self::Core(err) => err.suggestions(),
            Self::Io { .. } => vec!["Check permissions on the path above".into()],
            Self::Json(_) => vec!["Retry with --output-format plain".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(err) => err.category().into(),
            Self::Io { .. } | Self::Json(_) => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category() as u8
    }

    /// Record the failure in the log before it is shown to the user.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category = ?self.category(), "{self}")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category = ?self.category(), "{self}")
            }
        }
        for cause in self.causes() {
            tracing::debug!("caused by: {cause}");
        }
    }

    /// Renderable report; `color` toggles ANSI styling.
    pub fn report(&self, verbose: bool, color: bool) -> Report<'_> {
        Report {
            err: self,
            verbose,
            color,
        }
    }

    fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(self.source(), |err| (*err).source())
    }
}

/// Exit-code classes. The discriminant is the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCategory {
    Internal = 1,
    UserError = 2,
    NotFound = 3,
    Configuration = 4,
}

impl From<CoreCategory> for ErrorCategory {
    fn from(category: CoreCategory) -> Self {
        match category {
            CoreCategory::Validation | CoreCategory::Compatibility => Self::UserError,
            CoreCategory::NotFound => Self::NotFound,
            CoreCategory::Configuration => Self::Configuration,
            CoreCategory::Internal => Self::Internal,
        }
    }
}

/// Error message, causes (verbose only) and suggestions.
pub struct Report<'a> {
    err: &'a CliError,
    verbose: bool,
    color: bool,
}

impl Report<'_> {
    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let red = Style::new().red().bold();
        let dim = Style::new().dimmed();

        let marker = if self.color { "\u{2717} " } else { "" }; // ✗
        writeln!(f)?;
        writeln!(
            f,
            "{}{} {}",
            self.paint(marker, red),
            self.paint("Error:", red),
            self.paint(&self.err.to_string(), Style::new().red())
        )?;

        if self.verbose {
            for cause in self.err.causes() {
                writeln!(f, "  {}", self.paint(&format!("Caused by: {cause}"), dim))?;
            }
        }

        let suggestions = self.err.suggestions();
        if !suggestions.is_empty() {
            writeln!(f, "\n{}", self.paint("Suggestions:", Style::new().yellow().bold()))?;
            for suggestion in suggestions {
                writeln!(f, "  {suggestion}")?;
            }
        }

        if !self.verbose {
            writeln!(f, "\n{}", self.paint("Use -v / --verbose for more details.", dim))?;
        }
        Ok(())
    }
}

/// Attach a message to an I/O failure at the call site.
pub trait IntoCli<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for io::Result<T> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|source| CliError::Io {
            context: f().into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use opscaff_core::{application::ApplicationError, domain::DomainError};

    fn core(err: impl Into<OpscaffError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn usage_failures_exit_2() {
        let bad_flag = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        assert_eq!(bad_flag.exit_code(), 2);

        let conflict = core(DomainError::ConflictingInput {
            field: "project version",
            flag: "3".into(),
            config: "4".into(),
        });
        assert_eq!(conflict.exit_code(), 2);
    }

    #[test]
    fn missing_things_exit_3() {
        assert_eq!(core(DomainError::NoResolvedPlugin).exit_code(), 3);
        assert_eq!(
            core(ApplicationError::PluginNotFound { key: "x".into() }).exit_code(),
            3
        );
    }

    #[test]
    fn configuration_exits_4() {
        let cfg = CliError::config("x", io::Error::other("e"));
        assert_eq!(cfg.exit_code(), 4);
        assert_eq!(core(OpscaffError::configuration("none")).exit_code(), 4);
    }

    #[test]
    fn internal_exits_1() {
        let io_err = CliError::from(io::Error::other("e"));
        assert_eq!(io_err.exit_code(), 1);
        assert_eq!(
            core(DomainError::DuplicateKey { key: "a/v1".into() }).exit_code(),
            1
        );
    }

    #[test]
    fn plain_report_carries_core_suggestions() {
        let err = core(DomainError::NoAvailablePlugin { subcommand: "edit" });
        let text = err.report(false, false).to_string();
        assert!(text.contains("Error: resolved plugins do not provide any edit subcommand"));
        assert!(text.contains("Suggestions:"));
        assert!(text.contains("--verbose"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn verbose_report_lists_causes() {
        let err = CliError::config("bad file", io::Error::other("disk on fire"));
        let text = err.report(true, false).to_string();
        assert!(text.contains("Caused by: disk on fire"));
        assert!(!text.contains("--verbose"));
    }

    #[derive(Debug, Error)]
    #[error("project file unreadable")]
    struct Unreadable(#[source] io::Error);

    #[test]
    fn report_walks_the_whole_cause_chain() {
        let err = CliError::config("bad file", Unreadable(io::Error::other("permission denied")));
        let causes: Vec<String> = err.causes().map(|c| c.to_string()).collect();
        assert_eq!(causes, vec!["project file unreadable", "permission denied"]);

        let text = err.report(true, false).to_string();
        assert!(text.contains("Caused by: project file unreadable"));
        assert!(text.contains("Caused by: permission denied"));
    }

    #[test]
    fn colored_report_uses_ansi() {
        let err = core(DomainError::NoResolvedPlugin);
        assert!(err.report(false, true).to_string().contains('\u{1b}'));
    }

    #[test]
    fn io_context_becomes_message() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        match result.with_cli_context(|| "reading config") {
            Err(CliError::Io { context, .. }) => assert_eq!(context, "reading config"),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
