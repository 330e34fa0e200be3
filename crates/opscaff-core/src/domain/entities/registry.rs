//! Plugin registry.
//!
//! Populated once at startup, read-only afterwards. Iteration is always in
//! key order so listings and error candidate lists are deterministic.

use std::collections::BTreeMap;

use crate::domain::{entities::Plugin, error::DomainError, value_objects::Version};

/// Keyed plugin map plus the default-plugins table.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Plugin>,
    defaults: BTreeMap<Version, Vec<String>>,
    default_project_version: Option<Version>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a plugin under its canonical key.
    ///
    /// # Errors
    ///
    /// - Any validation error of [`Plugin::validate`]
    /// - `DuplicateKey` if the key is already registered
    pub fn register(&mut self, plugin: Plugin) -> Result<(), DomainError> {
        plugin.validate()?;
        let key = plugin.key();
        if self.plugins.contains_key(&key) {
            return Err(DomainError::DuplicateKey { key });
        }
        self.plugins.insert(key, plugin);
        Ok(())
    }

    /// Fluent form of [`register`](Self::register) for catalogue setup.
    pub fn with(mut self, plugin: Plugin) -> Result<Self, DomainError> {
        self.register(plugin)?;
        Ok(self)
    }

    /// Set the plugins used for `project_version` when none are requested.
    ///
    /// Every key must be a registered fully-qualified key whose plugin
    /// supports `project_version`.
    pub fn set_defaults<I, S>(&mut self, project_version: Version, keys: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        project_version
            .validate()
            .map_err(|e| DomainError::malformed_version(project_version.to_string(), e))?;

        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if keys.is_empty() {
            return Err(DomainError::EmptyDefaults { project_version });
        }

        for key in &keys {
            let plugin = self
                .plugins
                .get(key)
                .ok_or_else(|| DomainError::UnknownFullyQualifiedPlugin { key: key.clone() })?;
            if !plugin.supports(&project_version) {
                return Err(DomainError::UnsupportedProjectVersion {
                    key: key.clone(),
                    project_version,
                    supported: plugin.supported_project_versions().to_vec(),
                });
            }
        }

        self.defaults.insert(project_version, keys);
        Ok(())
    }

    pub fn set_default_project_version(&mut self, version: Version) -> Result<(), DomainError> {
        version
            .validate()
            .map_err(|e| DomainError::malformed_version(version.to_string(), e))?;
        self.default_project_version = Some(version);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Plugin> {
        self.plugins.get(key)
    }

    /// All plugins in key order.
    pub fn plugins(&self) -> impl Iterator<Item = &Plugin> {
        self.plugins.values()
    }

    /// All keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Default plugin keys for a project version, if any were set.
    pub fn defaults_for(&self, project_version: &Version) -> Option<&[String]> {
        self.defaults.get(project_version).map(Vec::as_slice)
    }

    pub fn default_project_version(&self) -> Option<Version> {
        self.default_project_version
    }

    /// Plugins that can scaffold `project_version`, in key order.
    pub fn supporting<'a>(&'a self, project_version: &'a Version) -> impl Iterator<Item = &'a Plugin> {
        self.plugins().filter(move |p| p.supports(project_version))
    }
}
