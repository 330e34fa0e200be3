//! Command handlers.
//!
//! Each handler translates parsed arguments into core service calls and
//! renders the result. No business logic lives here.

use std::sync::Arc;

use opscaff_adapters::{YamlProjectFile, builtin_registry};
use opscaff_core::{application::ResolutionService, domain::PluginRegistry};

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod plugins;
pub mod scaffold;

/// The compiled-in plugin catalogue.
fn registry() -> CliResult<Arc<PluginRegistry>> {
    Ok(Arc::new(builtin_registry()?))
}

/// Wire the resolution service to the project file and configuration.
fn resolution_service(global: &GlobalArgs, config: &AppConfig) -> CliResult<ResolutionService> {
    let store = YamlProjectFile::new(config.project_file(global));
    Ok(ResolutionService::new(
        registry()?,
        Box::new(store),
        config.configured_defaults()?,
    ))
}
