//! Built-in plugin catalogue.
//!
//! This module provides [`builtin_registry`], the single entry-point for the
//! plugins that ship with opscaff. Plugins are plain descriptors; the
//! scaffolding they perform lives outside this crate.
//!
//! # Catalogue
//!
//! | Key                                      | Kind   | Project versions |
//! |------------------------------------------|--------|------------------|
//! | `go.kubebuilder.io/v4`                   | bundle | 3                |
//! | `base.go.kubebuilder.io/v4`              | plugin | 3                |
//! | `kustomize.common.kubebuilder.io/v2`     | plugin | 3                |
//! | `go.kubebuilder.io/v3` (deprecated)      | plugin | 3                |
//! | `deploy-image.go.kubebuilder.io/v1-alpha`| plugin | 3                |
//! | `grafana.kubebuilder.io/v1-alpha`        | plugin | 3                |
//! | `helm.kubebuilder.io/v1-alpha`           | plugin | 3                |
//!
//! Project version 3 is the default, and `go.kubebuilder.io/v4` is its
//! default plugin chain.

use tracing::{debug, instrument};

use opscaff_core::{
    domain::{Capabilities, Capability, Plugin, PluginRegistry, Version},
    error::OpscaffResult,
};

/// Project version used when neither flags, project file nor config name one.
pub const DEFAULT_PROJECT_VERSION: Version = Version::stable(3);

const GO_V3_DEPRECATION: &str = "This version is deprecated. The `go/v3` plugin cannot scaffold \
projects in which CRDs and/or Webhooks have a `v1` API version. Use `go/v4` instead.";

/// Build the registry of compiled-in plugins.
///
/// Registration validates every descriptor, so an inconsistent catalogue
/// surfaces here as a domain error instead of at resolution time.
#[instrument]
pub fn builtin_registry() -> OpscaffResult<PluginRegistry> {
    let v3 = DEFAULT_PROJECT_VERSION;

    let kustomize = Plugin::builder("kustomize.common.kubebuilder.io", Version::stable(2))
        .supports(v3)
        .capability(Capability::Init)
        .capability(Capability::CreateApi)
        .capability(Capability::CreateWebhook)
        .description("Kustomize manifests for the manager, CRDs, RBAC and webhooks")
        .build()?;

    let base_go = Plugin::builder("base.go.kubebuilder.io", Version::stable(4))
        .supports(v3)
        .capabilities(Capabilities::all())
        .description("Go project layout, APIs, controllers and webhooks")
        .build()?;

    let go_v4 = Plugin::bundle("go.kubebuilder.io", Version::stable(4))
        .member(kustomize.clone())
        .member(base_go.clone())
        .description("Default Go operator layout (kustomize/v2 + base.go/v4)")
        .build()?;

    let go_v3 = Plugin::builder("go.kubebuilder.io", Version::stable(3))
        .supports(v3)
        .capabilities(Capabilities::all())
        .deprecated(GO_V3_DEPRECATION)
        .description("Legacy Go operator layout")
        .build()?;

    let deploy_image = Plugin::builder("deploy-image.go.kubebuilder.io", Version::alpha(1))
        .supports(v3)
        .capability(Capability::CreateApi)
        .description("API and controller that deploy and manage an operand image")
        .build()?;

    let grafana = Plugin::builder("grafana.kubebuilder.io", Version::alpha(1))
        .supports(v3)
        .capability(Capability::Init)
        .capability(Capability::Edit)
        .description("Grafana dashboards for controller-runtime metrics")
        .build()?;

    let helm = Plugin::builder("helm.kubebuilder.io", Version::alpha(1))
        .supports(v3)
        .capability(Capability::Init)
        .capability(Capability::Edit)
        .description("Helm chart to distribute the operator")
        .build()?;

    let mut registry = PluginRegistry::new();
    for plugin in [kustomize, base_go, go_v4, go_v3, deploy_image, grafana, helm] {
        debug!(key = %plugin.key(), "Registering builtin plugin");
        registry.register(plugin)?;
    }
    registry.set_defaults(v3, ["go.kubebuilder.io/v4"])?;
    registry.set_default_project_version(v3)?;

    Ok(registry)
}
