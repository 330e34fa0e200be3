pub mod bundle;
pub mod plugin;
pub mod project_config;
pub mod registry;

pub use crate::domain::DomainError;
pub use bundle::{BundleBuilder, common_supported_versions};
pub use plugin::{Plugin, PluginBuilder};
pub use project_config::ProjectConfig;
pub use registry::PluginRegistry;
