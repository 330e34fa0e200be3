//! Implementation of the `opscaff plugins` command.

use opscaff_core::{
    application::{PluginInfo, PluginService},
    domain::{DomainError, Version},
};

use crate::{
    cli::{ListFormat, OutputFormat, PluginsArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: PluginsArgs, output: OutputManager) -> CliResult<()> {
    let service = PluginService::new(super::registry()?);

    if let Some(key) = args.key.as_deref() {
        let plugin = service.get(key.trim())?;
        return if output.format() == OutputFormat::Json || args.format == ListFormat::Json {
            output.json(&plugin)
        } else {
            show_plugin(&plugin, &output)
        };
    }

    let filter = args
        .project_version_filter
        .as_deref()
        .map(parse_filter)
        .transpose()?;
    let plugins = service.list(filter.as_ref());

    // `--output-format json` upgrades the default table.
    let format = match (args.format, output.format()) {
        (ListFormat::Table, OutputFormat::Json) => ListFormat::Json,
        (format, _) => format,
    };

    match format {
        ListFormat::Table => {
            let heading = match &filter {
                Some(version) => format!("Plugins supporting project version {version}:"),
                None => "Available plugins:".to_string(),
            };
            output.header(&heading)?;
            for line in table_rows(&plugins) {
                output.print(&line)?;
            }
            if plugins.iter().any(|p| p.is_default) {
                output.print("")?;
                output.print(&output.dim("* default plugin chain"))?;
            }
        }

        // JSON must be parseable even in non-TTY pipes.
        ListFormat::Json => output.json(&plugins)?,

        ListFormat::List => {
            for plugin in &plugins {
                output.print(&plugin.key)?;
            }
        }
    }

    Ok(())
}

fn show_plugin(plugin: &PluginInfo, output: &OutputManager) -> CliResult<()> {
    output.header(&plugin.key)?;
    if let Some(description) = &plugin.description {
        output.print(&format!("  {description}"))?;
    }
    output.print(&format!("  name:             {}", plugin.name))?;
    output.print(&format!("  version:          {}", plugin.version))?;
    output.print(&format!(
        "  project versions: {}",
        plugin.supported_project_versions.join(", ")
    ))?;
    output.print(&format!("  subcommands:      {}", plugin.capabilities))?;
    if !plugin.members.is_empty() {
        output.print(&format!("  members:          {}", plugin.members.join(", ")))?;
    }
    if let Some(warning) = &plugin.deprecation {
        output.warning(warning)?;
    }
    Ok(())
}

fn parse_filter(raw: &str) -> CliResult<Version> {
    Version::parse(raw.trim()).map_err(|e| CliError::InvalidInput {
        message: format!("--project-version-filter {raw:?} is not a project version"),
        source: Some(Box::new(DomainError::malformed_version(raw, e))),
    })
}

/// One aligned line per plugin: marker, key, project versions, capabilities.
fn table_rows(plugins: &[PluginInfo]) -> Vec<String> {
    let width = plugins.iter().map(|p| p.key.len()).max().unwrap_or(0);
    plugins
        .iter()
        .map(|p| {
            let marker = if p.is_default { '*' } else { ' ' };
            let mut line = format!(
                "{marker} {:<width$}  [{}]  {}",
                p.key,
                p.supported_project_versions.join(", "),
                p.capabilities,
            );
            if !p.members.is_empty() {
                line.push_str(&format!("  (bundle: {})", p.members.join(" + ")));
            }
            if p.deprecation.is_some() {
                line.push_str("  (deprecated)");
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use opscaff_core::domain::Capabilities;

    use super::*;

    fn info(key: &str, is_default: bool) -> PluginInfo {
        PluginInfo {
            key: key.into(),
            name: key.split('/').next().unwrap_or_default().into(),
            version: "v1".into(),
            supported_project_versions: vec!["3".into()],
            capabilities: Capabilities::scaffolding(),
            members: vec![],
            deprecation: None,
            description: None,
            is_default,
        }
    }

    #[test]
    fn rows_are_aligned_and_marked() {
        let mut old = info("go.kubebuilder.io/v3", false);
        old.deprecation = Some("use go/v4".into());
        let rows = table_rows(&[info("a.io/v1", true), old]);

        assert!(rows[0].starts_with("* a.io/v1 "));
        assert!(rows[1].starts_with("  go.kubebuilder.io/v3"));
        assert!(rows[1].ends_with("(deprecated)"));
        assert_eq!(rows[0].find('['), rows[1].find('['));
    }

    #[test]
    fn bad_filter_is_user_error() {
        let err = parse_filter("latest").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn filter_accepts_prefixed_versions() {
        assert_eq!(parse_filter(" v3 ").unwrap(), Version::stable(3));
    }
}
