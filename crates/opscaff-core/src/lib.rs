//! Plugin and version resolution for opscaff.
//!
//! Operator projects are scaffolded by a chain of plugins, each identified by
//! a key such as `go.kubebuilder.io/v4`. This crate decides which chain runs
//! for a given project version and a list of (possibly partial) keys.
//!
//! Layout:
//!
//! - [`domain`]: versions, keys, plugins, bundles, the registry and the
//!   [`Resolver`](domain::Resolver). Pure and synchronous, no I/O.
//! - [`application`]: [`ResolutionService`](application::ResolutionService)
//!   merges flags, the `PROJECT` file and configured defaults, then resolves.
//!   The `PROJECT` file is reached through the
//!   [`ProjectConfigStore`](application::ports::ProjectConfigStore) port.
//! - [`error`]: [`OpscaffError`](error::OpscaffError), the error every public
//!   operation returns.
//!
//! The compiled-in plugins and the `PROJECT` file reader live in
//! `opscaff-adapters`.
//!
//! ## Usage
//!
//! ```rust
//! use opscaff_core::prelude::*;
//!
//! let plugin = Plugin::builder("go.kubebuilder.io", Version::stable(4))
//!     .supports(Version::stable(3))
//!     .capabilities(Capabilities::scaffolding())
//!     .build()
//!     .unwrap();
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(plugin).unwrap();
//!
//! let resolved = Resolver::new(&registry)
//!     .resolve(&Version::stable(3), &["go/v4"])
//!     .unwrap();
//! assert_eq!(resolved[0].key(), "go.kubebuilder.io/v4");
//! ```

pub mod domain;

pub mod application;

pub mod error;

pub mod prelude {
    pub use crate::application::{
        ConfiguredDefaults, PluginInfo, PluginService, Resolution, ResolutionRequest,
        ResolutionService, ports::ProjectConfigStore,
    };
    pub use crate::domain::{
        Capabilities, Capability, Plugin, PluginRegistry, ProjectConfig, Resolver, Stage,
        Version,
    };
    pub use crate::error::{OpscaffError, OpscaffResult};
}
