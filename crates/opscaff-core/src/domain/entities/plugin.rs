//! Plugin identity.
//!
//! A [`Plugin`] is identified by `(name, version)` and declares which
//! project-configuration versions it can scaffold. A bundle is a plugin
//! whose behavior is the ordered composition of its members; see
//! [`super::bundle`].

use crate::domain::{
    capabilities::{Capabilities, Capability},
    error::DomainError,
    key,
    value_objects::Version,
};

/// A registered scaffolding plugin or bundle.
///
/// Immutable after construction. Build one with [`Plugin::builder`] or
/// [`Plugin::bundle`]; both validate before handing the value out.
#[derive(Debug, Clone, PartialEq)]
pub struct Plugin {
    pub(crate) name: String,
    pub(crate) version: Version,
    pub(crate) supported_project_versions: Vec<Version>,
    pub(crate) capabilities: Capabilities,
    pub(crate) deprecation: Option<String>,
    pub(crate) description: Option<String>,
    /// Flattened members; `Some` only for bundles.
    pub(crate) members: Option<Vec<Plugin>>,
}

impl Plugin {
    /// Start the builder pattern for fluent construction.
    ///
    /// # Example
    /// ```rust
    /// use opscaff_core::domain::{Capabilities, Plugin, Version};
    ///
    /// let plugin = Plugin::builder("go.kubebuilder.io", Version::stable(4))
    ///     .supports(Version::stable(3))
    ///     .capabilities(Capabilities::scaffolding())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(plugin.key(), "go.kubebuilder.io/v4");
    /// ```
    pub fn builder(name: impl Into<String>, version: Version) -> PluginBuilder {
        PluginBuilder {
            name: name.into(),
            version,
            supported: Vec::new(),
            capabilities: Capabilities::none(),
            deprecation: None,
            description: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn supported_project_versions(&self) -> &[Version] {
        &self.supported_project_versions
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn provides(&self, capability: Capability) -> bool {
        self.capabilities.contains(capability)
    }

    /// Warning to show when the plugin is used, if it is deprecated.
    pub fn deprecation_warning(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_bundle(&self) -> bool {
        self.members.is_some()
    }

    /// Bundle members in composition order; empty for a plain plugin.
    pub fn members(&self) -> &[Plugin] {
        self.members.as_deref().unwrap_or_default()
    }

    /// The plugins that actually run: the members of a bundle, or the
    /// plugin itself.
    pub fn leaves(&self) -> &[Plugin] {
        match &self.members {
            Some(members) => members,
            None => std::slice::from_ref(self),
        }
    }

    /// Canonical `name/v<version>` key.
    pub fn key(&self) -> String {
        key::key_for(self)
    }

    pub fn short_name(&self) -> &str {
        key::short_name(&self.name)
    }

    pub fn supports(&self, project_version: &Version) -> bool {
        self.supported_project_versions
            .iter()
            .any(|v| v.compare(project_version).is_eq())
    }

    /// Validate all invariants.
    ///
    /// Registries call this on insertion so hand-assembled values are
    /// rejected as early as built ones.
    pub fn validate(&self) -> Result<(), DomainError> {
        key::validate_name(&self.name)?;

        self.version
            .validate()
            .map_err(|e| DomainError::malformed_version(self.version.prefixed(), e))?;

        if self.supported_project_versions.is_empty() {
            return Err(DomainError::InvalidPlugin {
                key: self.key(),
                reason: "must support at least one project version".into(),
            });
        }

        for version in &self.supported_project_versions {
            version
                .validate()
                .map_err(|e| DomainError::malformed_version(version.to_string(), e))?;
        }

        Ok(())
    }
}

/// Builder for plain (non-bundle) plugins.
///
/// Validation happens at `build()`, not in the setters.
#[derive(Debug, Clone)]
pub struct PluginBuilder {
    name: String,
    version: Version,
    supported: Vec<Version>,
    capabilities: Capabilities,
    deprecation: Option<String>,
    description: Option<String>,
}

impl PluginBuilder {
    /// Add a supported project version (accumulates, ignores repeats).
    pub fn supports(mut self, project_version: Version) -> Self {
        if !self.supported.contains(&project_version) {
            self.supported.push(project_version);
        }
        self
    }

    pub fn supports_all(self, project_versions: impl IntoIterator<Item = Version>) -> Self {
        project_versions.into_iter().fold(self, Self::supports)
    }

    pub fn capability(mut self, capability: Capability) -> Self {
        self.capabilities = self.capabilities.with(capability);
        self
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = self.capabilities.union(capabilities);
        self
    }

    pub fn deprecated(mut self, warning: impl Into<String>) -> Self {
        self.deprecation = Some(warning.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Consume builder and construct a validated [`Plugin`].
    ///
    /// # Errors
    ///
    /// - `InvalidName` if the name is not a DNS-1123 subdomain
    /// - `MalformedVersion` if a version literal has number 0
    /// - `InvalidPlugin` if no project version is supported
    pub fn build(self) -> Result<Plugin, DomainError> {
        let plugin = Plugin {
            name: self.name,
            version: self.version,
            supported_project_versions: self.supported,
            capabilities: self.capabilities,
            deprecation: self.deprecation,
            description: self.description,
            members: None,
        };
        plugin.validate()?;
        Ok(plugin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Stage;

    fn go_v4() -> Plugin {
        Plugin::builder("go.kubebuilder.io", Version::stable(4))
            .supports(Version::stable(3))
            .capabilities(Capabilities::scaffolding())
            .build()
            .unwrap()
    }

    #[test]
    fn builder_success() {
        let plugin = go_v4();
        assert_eq!(plugin.key(), "go.kubebuilder.io/v4");
        assert_eq!(plugin.short_name(), "go");
        assert!(plugin.supports(&Version::stable(3)));
        assert!(!plugin.supports(&Version::alpha(3)));
        assert!(plugin.provides(Capability::CreateApi));
        assert!(!plugin.is_bundle());
        assert_eq!(plugin.leaves(), std::slice::from_ref(&plugin));
    }

    #[test]
    fn builder_rejects_invalid_name() {
        let result = Plugin::builder("Go_Plugin", Version::stable(1))
            .supports(Version::stable(3))
            .build();
        assert!(matches!(result, Err(DomainError::InvalidName { .. })));
    }

    #[test]
    fn builder_rejects_zero_version() {
        let result = Plugin::builder("go.kubebuilder.io", Version::new(0, Stage::Stable))
            .supports(Version::stable(3))
            .build();
        assert!(matches!(result, Err(DomainError::MalformedVersion { .. })));

        let result = Plugin::builder("go.kubebuilder.io", Version::stable(1))
            .supports(Version::new(0, Stage::Beta))
            .build();
        assert!(matches!(result, Err(DomainError::MalformedVersion { .. })));
    }

    #[test]
    fn builder_requires_supported_versions() {
        let result = Plugin::builder("go.kubebuilder.io", Version::stable(4)).build();
        assert_eq!(
            result,
            Err(DomainError::InvalidPlugin {
                key: "go.kubebuilder.io/v4".into(),
                reason: "must support at least one project version".into(),
            })
        );
    }

    #[test]
    fn supports_ignores_repeats() {
        let plugin = Plugin::builder("a.io", Version::stable(1))
            .supports_all([Version::stable(2), Version::stable(2), Version::stable(3)])
            .build()
            .unwrap();
        assert_eq!(plugin.supported_project_versions().len(), 2);
    }

    #[test]
    fn deprecation_is_carried() {
        let plugin = Plugin::builder("go.kubebuilder.io", Version::stable(3))
            .supports(Version::stable(3))
            .deprecated("use go/v4")
            .build()
            .unwrap();
        assert_eq!(plugin.deprecation_warning(), Some("use go/v4"));
    }
}
