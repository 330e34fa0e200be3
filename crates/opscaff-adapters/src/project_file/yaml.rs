//! `PROJECT` file reader.
//!
//! Only the fields plugin resolution needs are read:
//!
//! ```yaml
//! version: "3"
//! layout:
//! - go.kubebuilder.io/v4
//! domain: example.com   # ignored
//! ```
//!
//! `version` may be written as a string or a bare integer, and `layout` as a
//! single key or a list of keys.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, instrument};

use opscaff_core::{
    application::{ApplicationError, ports::ProjectConfigStore},
    domain::{ProjectConfig, Version},
    error::{OpscaffError, OpscaffResult},
};

/// Default file name, relative to the working directory.
pub const DEFAULT_PROJECT_FILE: &str = "PROJECT";

#[derive(Debug, Deserialize)]
struct RawProject {
    version: Option<RawVersion>,
    #[serde(default)]
    layout: Option<RawLayout>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLayout {
    One(String),
    Many(Vec<String>),
}

impl RawLayout {
    fn into_keys(self) -> Vec<String> {
        let keys = match self {
            Self::One(key) => vec![key],
            Self::Many(keys) => keys,
        };
        keys.into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Production project store backed by a YAML file on disk.
#[derive(Debug, Clone)]
pub struct YamlProjectFile {
    path: PathBuf,
}

impl YamlProjectFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a `PROJECT` document.
    pub fn parse(&self, contents: &str) -> OpscaffResult<ProjectConfig> {
        let raw: RawProject =
            serde_yaml::from_str(contents).map_err(|e| self.error(e.to_string()))?;

        let version = match raw.version {
            Some(RawVersion::Number(n)) => n.to_string(),
            Some(RawVersion::Text(s)) => s,
            None => return Err(self.error("missing 'version' field")),
        };
        let version = Version::parse(version.trim())
            .map_err(|e| self.error(format!("invalid version {version:?}: {e}")))?;

        let plugin_chain = raw.layout.map(RawLayout::into_keys).unwrap_or_default();

        Ok(ProjectConfig::new(version, plugin_chain))
    }

    fn error(&self, reason: impl Into<String>) -> OpscaffError {
        ApplicationError::ProjectFile {
            path: self.path.clone(),
            reason: reason.into(),
        }
        .into()
    }
}

impl Default for YamlProjectFile {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_FILE)
    }
}

impl ProjectConfigStore for YamlProjectFile {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> OpscaffResult<Option<ProjectConfig>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Project file not found");
                return Ok(None);
            }
            Err(e) => return Err(self.error(e.to_string())),
        };

        let config = self.parse(&contents)?;
        debug!(version = %config.version, layout = ?config.plugin_chain, "Project file read");
        Ok(Some(config))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir, contents: Option<&str>) -> YamlProjectFile {
        let path = dir.path().join(DEFAULT_PROJECT_FILE);
        if let Some(contents) = contents {
            fs::write(&path, contents).unwrap();
        }
        YamlProjectFile::new(path)
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store_in(&dir, None).load().unwrap(), None);
    }

    #[test]
    fn reads_version_and_layout_list() {
        let dir = TempDir::new().unwrap();
        let store = store_in(
            &dir,
            Some("domain: example.com\nlayout:\n- go.kubebuilder.io/v4\n- helm.kubebuilder.io/v1-alpha\nversion: \"3\"\n"),
        );
        let config = store.load().unwrap().unwrap();
        assert_eq!(config.version, Version::stable(3));
        assert_eq!(
            config.plugin_chain,
            vec!["go.kubebuilder.io/v4", "helm.kubebuilder.io/v1-alpha"]
        );
    }

    #[test]
    fn accepts_single_layout_and_integer_version() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, Some("version: 2\nlayout: go.kubebuilder.io/v2\n"));
        let config = store.load().unwrap().unwrap();
        assert_eq!(config.version, Version::stable(2));
        assert_eq!(config.plugin_chain, vec!["go.kubebuilder.io/v2"]);
    }

    #[test]
    fn layout_is_optional() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, Some("version: 3-alpha\n"));
        let config = store.load().unwrap().unwrap();
        assert_eq!(config.version, Version::alpha(3));
        assert!(config.plugin_chain.is_empty());
    }

    #[test]
    fn rejects_missing_or_bad_version() {
        let dir = TempDir::new().unwrap();
        for contents in ["layout: go.kubebuilder.io/v4\n", "version: \"0\"\n", "version: [1\n"] {
            let store = store_in(&dir, Some(contents));
            assert!(
                matches!(
                    store.load(),
                    Err(OpscaffError::Application(ApplicationError::ProjectFile { .. }))
                ),
                "{contents:?} should be rejected"
            );
        }
    }
}
