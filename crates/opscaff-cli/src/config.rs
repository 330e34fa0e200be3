//! User configuration: fallback project version and plugins, output
//! preferences and the project file location.
//!
//! Layers, later wins: built-in defaults, the TOML file (`--config`, or
//! `config.toml` under the platform config dir), then `OPSCAFF_*` variables
//! with `__` between section and field, e.g.
//! `OPSCAFF_DEFAULTS__PLUGINS=go/v4,helm/v1-alpha`. Command-line flags are
//! applied by the callers on top of the result.
//!
//! Only [`ConfiguredDefaults`] crosses into `opscaff-core`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use opscaff_adapters::project_file::DEFAULT_PROJECT_FILE;
use opscaff_core::{
    application::ConfiguredDefaults,
    domain::{DomainError, Version, key},
};

use crate::{
    cli::global::GlobalArgs,
    error::{CliError, CliResult},
};

const ENV_PREFIX: &str = "OPSCAFF";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallbacks used when neither flags nor the project file decide.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Project file settings.
    pub project: ProjectConfigSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_version: Option<String>,
    pub plugins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfigSection {
    pub file: PathBuf,
}

impl Default for ProjectConfigSection {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_PROJECT_FILE),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment on top of the defaults.
    ///
    /// A file passed via `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let settings = Config::builder()
            .add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("defaults.plugins"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from '{}'", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("Invalid configuration in '{}'", path.display()))
    }

    /// Per-user config file, or `.opscaff.toml` when no home directory
    /// can be determined.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "opscaff", "opscaff")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".opscaff.toml"))
    }

    /// The configuration file in effect for this invocation.
    pub fn active_path(global: &GlobalArgs) -> PathBuf {
        global.config.clone().unwrap_or_else(Self::config_path)
    }

    /// The project file to read: `--project-file`, then `project.file`.
    pub fn project_file(&self, global: &GlobalArgs) -> PathBuf {
        global
            .project_file
            .clone()
            .unwrap_or_else(|| self.project.file.clone())
    }

    /// Fallback inputs for plugin resolution.
    pub fn configured_defaults(&self) -> CliResult<ConfiguredDefaults> {
        let project_version = match self.defaults.project_version.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                let version = Version::parse(raw)
                    .map_err(|e| DomainError::malformed_version(raw, e))
                    .map_err(|e| {
                        CliError::config("defaults.project_version is not a valid version", e)
                    })?;
                Some(version)
            }
            _ => None,
        };

        let plugins = key::parse_key_list(&self.defaults.plugins.join(","));

        Ok(ConfiguredDefaults {
            project_version,
            plugins,
        })
    }

    /// Render as TOML, as written by `config init`.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::config("Failed to serialise config", e))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_are_empty() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.project_version.is_none());
        assert!(cfg.defaults.plugins.is_empty());
        assert!(!cfg.output.no_color);
        assert_eq!(cfg.output.format, "auto");
        assert_eq!(cfg.project.file, PathBuf::from("PROJECT"));
    }

    #[test]
    fn load_reads_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[defaults]\nproject_version = \"3\"\nplugins = [\"go/v4\", \"helm/v1-alpha\"]\n\n[output]\nno_color = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.defaults.project_version.as_deref(), Some("3"));
        assert_eq!(cfg.defaults.plugins, vec!["go/v4", "helm/v1-alpha"]);
        assert!(cfg.output.no_color);
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn configured_defaults_parse_version() {
        let mut cfg = AppConfig::default();
        cfg.defaults.project_version = Some(" 3 ".into());
        cfg.defaults.plugins = vec!["go/v4".into(), " ".into()];
        let defaults = cfg.configured_defaults().unwrap();
        assert_eq!(defaults.project_version, Some(Version::stable(3)));
        assert_eq!(defaults.plugins, vec!["go/v4"]);
    }

    #[test]
    fn configured_defaults_reject_bad_version() {
        let mut cfg = AppConfig::default();
        cfg.defaults.project_version = Some("three".into());
        let err = cfg.configured_defaults().unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn project_flag_overrides_config() {
        let cfg = AppConfig::default();
        let mut global = GlobalArgs::default();
        assert_eq!(cfg.project_file(&global), PathBuf::from("PROJECT"));
        global.project_file = Some(PathBuf::from("other/PROJECT"));
        assert_eq!(cfg.project_file(&global), PathBuf::from("other/PROJECT"));
    }

    #[test]
    fn toml_round_trips_through_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = AppConfig::default();
        cfg.defaults.plugins = vec!["go.kubebuilder.io/v4".into()];
        fs::write(&path, cfg.to_toml().unwrap()).unwrap();
        assert_eq!(AppConfig::load(Some(path.as_path())).unwrap(), cfg);
    }
}
