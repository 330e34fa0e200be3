//! Implementation of the plugin-backed subcommands: `init`, `create api`,
//! `create webhook` and `edit`.
//!
//! Each one resolves the plugin chain, keeps the plugins that implement the
//! subcommand, and reports the chain that would run. The scaffolding itself
//! is performed by the plugins, outside this binary.

use serde::Serialize;
use tracing::{info, instrument};

use opscaff_core::{
    application::{Deprecation, ResolutionRequest, ResolutionSummary},
    domain::{Capability, Plugin},
    error::OpscaffError,
};

use crate::{
    cli::{GlobalArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON report for one subcommand run.
#[derive(Debug, Serialize)]
struct SubcommandReport<'a> {
    subcommand: &'static str,
    #[serde(flatten)]
    resolution: ResolutionSummary,
    /// Leaf plugins that implement the subcommand, in execution order.
    chain: Vec<String>,
    deprecations: &'a [Deprecation],
}

/// Execute a plugin-backed subcommand.
#[instrument(skip_all, fields(subcommand = capability.as_str()))]
pub fn execute(
    capability: Capability,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = super::resolution_service(&global, &config)?;
    let request = ResolutionRequest {
        project_version: global.project_version.clone(),
        plugins: global.plugin_keys(),
    };

    let resolution = service.resolve(&request)?;
    let providers: Vec<&Plugin> = resolution
        .providers(capability)
        .map_err(OpscaffError::from)?;
    let chain: Vec<String> = providers.iter().map(|p| p.key()).collect();

    let deprecations = resolution.deprecations();
    for notice in &deprecations {
        output.warning(&format!("{}: {}", notice.key, notice.warning))?;
    }

    info!(chain = ?chain, "Subcommand plugins selected");

    if output.format() == OutputFormat::Json {
        return output.json(&SubcommandReport {
            subcommand: capability.as_str(),
            resolution: resolution.summary(),
            chain,
            deprecations: &deprecations,
        });
    }

    let sources = resolution.sources();
    output.header(&format!(
        "Plugin chain for `{capability}` (project version {}):",
        resolution.project_version()
    ))?;
    for (position, key) in chain.iter().enumerate() {
        output.print(&format!("  {}. {key}", position + 1))?;
    }
    output.info(&format!(
        "project version from {}, plugins from {}",
        sources.project_version, sources.plugins
    ))?;

    Ok(())
}
