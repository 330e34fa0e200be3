//! Plugin key resolution.
//!
//! Maps user-supplied keys, which may be partial, to exactly one registered
//! plugin each. A key can take four forms:
//!
//! | Form                     | Example                | Matching                          |
//! |--------------------------|------------------------|-----------------------------------|
//! | fully-qualified + version| `go.kubebuilder.io/v4` | direct lookup                     |
//! | short + version          | `go/v4`                | short name and version            |
//! | fully-qualified name     | `go.kubebuilder.io`    | exact name, any version           |
//! | short name               | `go`                   | short name, any version           |
//!
//! Partial forms only consider plugins that support the target project
//! version; more than one survivor is an ambiguity, never a guess.

use crate::domain::{
    entities::{Plugin, PluginRegistry},
    error::{DomainError, NoMatchReason},
    key,
    value_objects::Version,
};

/// Resolves plugin keys against a registry for one project version.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    registry: &'a PluginRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a PluginRegistry) -> Self {
        Self { registry }
    }

    /// Resolve every key, in input order, or fail on the first bad one.
    ///
    /// An empty key list falls back to the registry's defaults for
    /// `project_version`. Missing defaults yield an empty list; callers that
    /// need plugins report that themselves.
    pub fn resolve<S: AsRef<str>>(
        &self,
        project_version: &Version,
        keys: &[S],
    ) -> Result<Vec<Plugin>, DomainError> {
        if keys.is_empty() {
            return match self.registry.defaults_for(project_version) {
                Some(defaults) => self.resolve_all(project_version, defaults),
                None => Ok(Vec::new()),
            };
        }
        self.resolve_all(project_version, keys)
    }

    fn resolve_all<S: AsRef<str>>(
        &self,
        project_version: &Version,
        keys: &[S],
    ) -> Result<Vec<Plugin>, DomainError> {
        keys.iter()
            .map(|k| self.resolve_key(project_version, k.as_ref()).cloned())
            .collect()
    }

    /// Resolve a single key to the registered plugin it designates.
    pub fn resolve_key(
        &self,
        project_version: &Version,
        plugin_key: &str,
    ) -> Result<&'a Plugin, DomainError> {
        let (name, version) = key::split_key(plugin_key);
        let version = if version.is_empty() {
            None
        } else {
            Some(
                Version::parse(version)
                    .map_err(|e| DomainError::malformed_version(version, e))?,
            )
        };
        let fully_qualified = key::is_fully_qualified(name);

        if let (true, Some(version)) = (fully_qualified, version) {
            return self.lookup(project_version, &key::key(name, &version.to_string()));
        }

        let short = key::short_name(name);
        let by_name: Vec<&'a Plugin> = self
            .registry
            .plugins()
            .filter(|p| {
                if fully_qualified {
                    p.name() == name
                } else {
                    p.short_name() == short
                }
            })
            .collect();
        if by_name.is_empty() {
            return Err(self.no_match(
                plugin_key,
                project_version,
                NoMatchReason::Names,
                self.registry.keys().map(String::from).collect(),
            ));
        }

        let by_version: Vec<&'a Plugin> = match version {
            Some(version) => by_name
                .iter()
                .copied()
                .filter(|p| p.version().compare(&version).is_eq())
                .collect(),
            None => by_name.clone(),
        };
        if by_version.is_empty() {
            return Err(self.no_match(
                plugin_key,
                project_version,
                NoMatchReason::Versions,
                keys_of(&by_name),
            ));
        }

        let supporting: Vec<&'a Plugin> = by_version
            .iter()
            .copied()
            .filter(|p| p.supports(project_version))
            .collect();

        match supporting.as_slice() {
            [] => Err(self.no_match(
                plugin_key,
                project_version,
                NoMatchReason::Versions,
                keys_of(&by_version),
            )),
            [plugin] => Ok(*plugin),
            many => Err(DomainError::AmbiguousPlugin {
                key: plugin_key.to_string(),
                project_version: *project_version,
                candidates: keys_of(many),
            }),
        }
    }

    fn lookup(&self, project_version: &Version, canonical: &str) -> Result<&'a Plugin, DomainError> {
        let plugin = self.registry.get(canonical).ok_or_else(|| {
            DomainError::UnknownFullyQualifiedPlugin {
                key: canonical.to_string(),
            }
        })?;
        if !plugin.supports(project_version) {
            return Err(DomainError::UnsupportedProjectVersion {
                key: canonical.to_string(),
                project_version: *project_version,
                supported: plugin.supported_project_versions().to_vec(),
            });
        }
        Ok(plugin)
    }

    fn no_match(
        &self,
        plugin_key: &str,
        project_version: &Version,
        reason: NoMatchReason,
        candidates: Vec<String>,
    ) -> DomainError {
        DomainError::NoMatchingPlugin {
            key: plugin_key.to_string(),
            project_version: *project_version,
            reason,
            candidates,
        }
    }
}

fn keys_of(plugins: &[&Plugin]) -> Vec<String> {
    let mut keys: Vec<String> = plugins.iter().map(|p| p.key()).collect();
    keys.sort();
    keys
}
