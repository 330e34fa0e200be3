//! Resolution Service - turns user inputs into a plugin chain.
//!
//! This service coordinates one command invocation:
//! 1. Load the project file (if any)
//! 2. Merge flag, project file and configured inputs, rejecting conflicts
//! 3. Validate and resolve the plugin keys against the registry
//!
//! The returned [`Resolution`] answers the command-time questions: which
//! plugins provide a subcommand, and which of them are deprecated.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::ports::ProjectConfigStore,
    domain::{
        Capability, DomainError, DomainValidator as validator, Plugin, PluginRegistry,
        ProjectConfig, Resolver, Version,
    },
    error::{OpscaffError, OpscaffResult},
};

/// Raw flag values for one invocation.
///
/// Empty strings and empty lists mean "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub project_version: Option<String>,
    pub plugins: Vec<String>,
}

/// Fallbacks from the user's tool configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguredDefaults {
    pub project_version: Option<Version>,
    pub plugins: Vec<String>,
}

/// Where a resolved input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputSource {
    Flag,
    ProjectFile,
    Configuration,
    Builtin,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "flag",
            Self::ProjectFile => "project file",
            Self::Configuration => "configuration",
            Self::Builtin => "builtin default",
        })
    }
}

/// Provenance of both resolved inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sources {
    pub project_version: InputSource,
    pub plugins: InputSource,
}

/// Outcome of resolving one invocation's inputs.
#[derive(Debug, Clone)]
pub struct Resolution {
    project_version: Version,
    keys: Vec<String>,
    plugins: Vec<Plugin>,
    sources: Sources,
}

/// A deprecation notice for a resolved plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deprecation {
    pub key: String,
    pub warning: String,
}

/// Serializable view of a [`Resolution`] for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionSummary {
    pub project_version: String,
    pub sources: Sources,
    pub requested: Vec<String>,
    pub resolved: Vec<String>,
}

impl Resolution {
    pub fn project_version(&self) -> Version {
        self.project_version
    }

    /// The keys that were resolved, after falling back to defaults.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Resolved plugins, in request order. May be empty.
    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    pub fn sources(&self) -> Sources {
        self.sources
    }

    /// The resolved plugins, or `NoResolvedPlugin` when there are none.
    pub fn require_plugins(&self) -> Result<&[Plugin], DomainError> {
        if self.plugins.is_empty() {
            return Err(DomainError::NoResolvedPlugin);
        }
        Ok(&self.plugins)
    }

    /// Plugins that implement `capability`, bundles expanded, in chain order.
    pub fn providers(&self, capability: Capability) -> Result<Vec<&Plugin>, DomainError> {
        let providers: Vec<&Plugin> = self
            .require_plugins()?
            .iter()
            .flat_map(Plugin::leaves)
            .filter(|p| p.provides(capability))
            .collect();

        if providers.is_empty() {
            return Err(DomainError::NoAvailablePlugin {
                subcommand: capability.as_str(),
            });
        }
        Ok(providers)
    }

    /// Deprecation notices of the resolved plugins and their bundle members.
    pub fn deprecations(&self) -> Vec<Deprecation> {
        let mut notices: Vec<Deprecation> = Vec::new();
        let chain = self
            .plugins
            .iter()
            .flat_map(|p| std::iter::once(p).chain(p.members()));
        for plugin in chain {
            if let Some(warning) = plugin.deprecation_warning() {
                let key = plugin.key();
                if !notices.iter().any(|n| n.key == key) {
                    notices.push(Deprecation {
                        key,
                        warning: warning.to_string(),
                    });
                }
            }
        }
        notices
    }

    pub fn summary(&self) -> ResolutionSummary {
        ResolutionSummary {
            project_version: self.project_version.to_string(),
            sources: self.sources,
            requested: self.keys.clone(),
            resolved: self.plugins.iter().map(Plugin::key).collect(),
        }
    }
}

/// Service that resolves plugin inputs for a command invocation.
pub struct ResolutionService {
    registry: Arc<PluginRegistry>,
    store: Box<dyn ProjectConfigStore>,
    defaults: ConfiguredDefaults,
}

impl ResolutionService {
    /// Create a new resolution service.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::sync::Arc;
    /// use opscaff_core::application::{ConfiguredDefaults, ResolutionRequest, ResolutionService};
    /// # fn demo(registry: opscaff_core::domain::PluginRegistry,
    /// #         store: Box<dyn opscaff_core::application::ports::ProjectConfigStore>) {
    /// let service = ResolutionService::new(Arc::new(registry), store, ConfiguredDefaults::default());
    /// let resolution = service.resolve(&ResolutionRequest::default());
    /// # }
    /// ```
    pub fn new(
        registry: Arc<PluginRegistry>,
        store: Box<dyn ProjectConfigStore>,
        defaults: ConfiguredDefaults,
    ) -> Self {
        Self {
            registry,
            store,
            defaults,
        }
    }

    /// Resolve the project version and plugin chain for one invocation.
    #[instrument(
        skip_all,
        fields(
            flag_version = request.project_version.as_deref().unwrap_or(""),
            flag_plugins = request.plugins.len()
        )
    )]
    pub fn resolve(&self, request: &ResolutionRequest) -> OpscaffResult<Resolution> {
        let project = self.store.load()?;
        match &project {
            Some(config) => debug!(
                version = %config.version,
                layout = ?config.plugin_chain,
                "Project file loaded"
            ),
            None => debug!("No project file"),
        }

        let (project_version, version_source) =
            self.select_project_version(request, project.as_ref())?;
        let (keys, plugin_source) = self.select_keys(request, project.as_ref(), &project_version)?;

        for key in &keys {
            validator::validate_key(key)?;
        }

        let plugins = Resolver::new(&self.registry).resolve(&project_version, &keys)?;

        info!(
            project_version = %project_version,
            version_source = %version_source,
            plugin_source = %plugin_source,
            resolved = plugins.len(),
            "Plugins resolved"
        );

        Ok(Resolution {
            project_version,
            keys,
            plugins,
            sources: Sources {
                project_version: version_source,
                plugins: plugin_source,
            },
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn select_project_version(
        &self,
        request: &ResolutionRequest,
        project: Option<&ProjectConfig>,
    ) -> OpscaffResult<(Version, InputSource)> {
        let flag = match request.project_version.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(
                Version::parse(raw).map_err(|e| DomainError::malformed_version(raw, e))?,
            ),
            _ => None,
        };

        match (flag, project.map(|p| p.version)) {
            (Some(flag), Some(config)) if !flag.compare(&config).is_eq() => {
                Err(DomainError::ConflictingInput {
                    field: "project version",
                    flag: flag.to_string(),
                    config: config.to_string(),
                }
                .into())
            }
            (Some(flag), _) => Ok((flag, InputSource::Flag)),
            (None, Some(config)) => Ok((config, InputSource::ProjectFile)),
            (None, None) => {
                if let Some(version) = self.defaults.project_version {
                    Ok((version, InputSource::Configuration))
                } else if let Some(version) = self.registry.default_project_version() {
                    Ok((version, InputSource::Builtin))
                } else {
                    Err(OpscaffError::configuration(
                        "no project version given and no default is configured",
                    ))
                }
            }
        }
    }

    fn select_keys(
        &self,
        request: &ResolutionRequest,
        project: Option<&ProjectConfig>,
        project_version: &Version,
    ) -> OpscaffResult<(Vec<String>, InputSource)> {
        let flag: Vec<String> = request
            .plugins
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(String::from)
            .collect();
        let chain: &[String] = project
            .map(|p| p.plugin_chain.as_slice())
            .unwrap_or_default();

        if !flag.is_empty() && !chain.is_empty() && flag.as_slice() != chain {
            return Err(DomainError::ConflictingInput {
                field: "plugins",
                flag: flag.join(","),
                config: chain.join(","),
            }
            .into());
        }

        if !flag.is_empty() {
            return Ok((flag, InputSource::Flag));
        }
        if !chain.is_empty() {
            return Ok((chain.to_vec(), InputSource::ProjectFile));
        }
        if !self.defaults.plugins.is_empty() {
            return Ok((self.defaults.plugins.clone(), InputSource::Configuration));
        }

        let builtin = self
            .registry
            .defaults_for(project_version)
            .map(<[String]>::to_vec)
            .unwrap_or_default();
        Ok((builtin, InputSource::Builtin))
    }
}
