//! Plugin Service - plugin catalogue queries.
//!
//! Read-only views over the registry for listing commands.
//! Separated from ResolutionService for single responsibility.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::{
    application::ApplicationError,
    domain::{Capabilities, Plugin, PluginRegistry, Version},
    error::OpscaffResult,
};

/// Information about a plugin for display purposes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginInfo {
    pub key: String,
    pub name: String,
    pub version: String,
    pub supported_project_versions: Vec<String>,
    pub capabilities: Capabilities,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the plugin is a default for the listed project version.
    pub is_default: bool,
}

/// Service for plugin catalogue operations.
pub struct PluginService {
    registry: Arc<PluginRegistry>,
}

impl PluginService {
    /// Create a new plugin service.
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self { registry }
    }

    /// List plugins in key order, optionally only those supporting
    /// `project_version`.
    ///
    /// Default markers refer to `project_version`, or to the registry's
    /// default project version when no filter is given.
    pub fn list(&self, project_version: Option<&Version>) -> Vec<PluginInfo> {
        let defaults_version = project_version
            .copied()
            .or_else(|| self.registry.default_project_version());

        let plugins: Vec<&Plugin> = match project_version {
            Some(version) => self.registry.supporting(version).collect(),
            None => self.registry.plugins().collect(),
        };
        let infos: Vec<PluginInfo> = plugins
            .into_iter()
            .map(|p| self.info(p, defaults_version.as_ref()))
            .collect();

        debug!(count = infos.len(), filter = ?project_version, "Listed plugins");
        infos
    }

    /// Get a plugin by its fully-qualified key.
    pub fn get(&self, key: &str) -> OpscaffResult<PluginInfo> {
        let plugin = self
            .registry
            .get(key)
            .ok_or_else(|| ApplicationError::PluginNotFound {
                key: key.to_string(),
            })?;
        let defaults_version = self.registry.default_project_version();
        Ok(self.info(plugin, defaults_version.as_ref()))
    }

    fn info(&self, plugin: &Plugin, defaults_version: Option<&Version>) -> PluginInfo {
        let key = plugin.key();
        let is_default = defaults_version
            .and_then(|v| self.registry.defaults_for(v))
            .is_some_and(|keys| keys.contains(&key));

        PluginInfo {
            name: plugin.name().to_string(),
            version: plugin.version().prefixed(),
            supported_project_versions: plugin
                .supported_project_versions()
                .iter()
                .map(Version::to_string)
                .collect(),
            capabilities: plugin.capabilities(),
            members: plugin.members().iter().map(Plugin::key).collect(),
            deprecation: plugin.deprecation_warning().map(String::from),
            description: plugin.description().map(String::from),
            is_default,
            key,
        }
    }
}
