//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve the plugin chain" or "list plugins".

pub mod plugin_service;
pub mod resolution_service;

pub use plugin_service::{PluginInfo, PluginService};
pub use resolution_service::{
    ConfiguredDefaults, Deprecation, InputSource, Resolution, ResolutionRequest,
    ResolutionService, ResolutionSummary, Sources,
};
