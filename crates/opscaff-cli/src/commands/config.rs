//! `opscaff config` inspects and creates the tool configuration.

use std::path::Path;

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&config.to_toml()?)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::active_path(&global).display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            let path = AppConfig::active_path(&global);
            if path.exists() && !force {
                output.warning(&format!(
                    "Config already exists at {}  (use --force to overwrite)",
                    path.display(),
                ))?;
                return Ok(());
            }
            write_default_config(&path)?;
            output.success(&format!("Configuration created at {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.project_version" => {
            Ok(config.defaults.project_version.clone().unwrap_or_default())
        }
        "defaults.plugins" => Ok(config.defaults.plugins.join(",")),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "project.file" => Ok(config.project.file.display().to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

fn write_default_config(path: &Path) -> CliResult<()> {
    let toml = AppConfig::default().to_toml()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

// ── tests ─────────────────────────────────────────────────────────────────────
