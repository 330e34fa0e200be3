//! Command-line surface of `opscaff`: subcommands, their flags and help.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "opscaff",
    bin_name = "opscaff",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Plugin-driven Kubernetes operator scaffolding",
    long_about = "Plugin-driven Kubernetes operator scaffolding.\n\n\
                  opscaff resolves the plugin chain of an operator project \
                  from flags, the PROJECT file and configuration, and reports \
                  which plugins serve each scaffolding subcommand.",
    after_help = "EXAMPLES:\n\
        \x20 opscaff init --plugins go/v4 --project-version 3\n\
        \x20 opscaff create api\n\
        \x20 opscaff plugins --format json\n\
        \x20 opscaff completions bash > /usr/share/bash-completion/completions/opscaff",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialise a new project with the resolved plugin chain.
    #[command(
        about = "Initialise a new project",
        after_help = "EXAMPLES:\n\
            \x20 opscaff init\n\
            \x20 opscaff init --plugins go/v4,helm/v1-alpha\n\
            \x20 opscaff init --project-version 3 --output-format json"
    )]
    Init,

    /// Scaffold a Kubernetes API or webhook.
    #[command(about = "Scaffold a Kubernetes API or webhook", subcommand)]
    Create(CreateCommands),

    /// Update the project configuration.
    #[command(
        about = "Update the project configuration",
        after_help = "EXAMPLES:\n\
            \x20 opscaff edit --plugins helm/v1-alpha"
    )]
    Edit,

    /// List registered plugins.
    #[command(
        visible_alias = "ls",
        about = "List available plugins",
        after_help = "EXAMPLES:\n\
            \x20 opscaff plugins\n\
            \x20 opscaff plugins --project-version-filter 3\n\
            \x20 opscaff plugins go.kubebuilder.io/v4\n\
            \x20 opscaff plugins --format json"
    )]
    Plugins(PluginsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 opscaff completions bash > ~/.local/share/bash-completion/completions/opscaff\n\
            \x20 opscaff completions zsh  > ~/.zfunc/_opscaff\n\
            \x20 opscaff completions fish > ~/.config/fish/completions/opscaff.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the opscaff configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 opscaff config get defaults.plugins\n\
            \x20 opscaff config list\n\
            \x20 opscaff config init --force"
    )]
    Config(ConfigCommands),
}

// ── create ────────────────────────────────────────────────────────────────────

/// Subcommands for `opscaff create`.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum CreateCommands {
    /// Scaffold a Kubernetes API.
    Api,
    /// Scaffold a webhook for an API resource.
    Webhook,
}

// ── plugins ───────────────────────────────────────────────────────────────────

/// Arguments for `opscaff plugins`.
#[derive(Debug, Args)]
pub struct PluginsArgs {
    /// Show a single plugin by its fully-qualified key.
    #[arg(value_name = "KEY", help = "Fully-qualified plugin key, e.g. go.kubebuilder.io/v4")]
    pub key: Option<String>,

    /// Only list plugins that support this project version.
    #[arg(
        long = "project-version-filter",
        value_name = "VERSION",
        help = "Only show plugins supporting this project version"
    )]
    pub project_version_filter: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `plugins` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One key per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `opscaff completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `opscaff config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.plugins`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_create_api() {
        let cli = Cli::parse_from(["opscaff", "create", "api"]);
        assert!(matches!(cli.command, Commands::Create(CreateCommands::Api)));
    }

    #[test]
    fn resolution_flags_are_global() {
        let cli = Cli::parse_from([
            "opscaff",
            "create",
            "webhook",
            "--plugins",
            "go/v4",
            "--project-version",
            "3",
        ]);
        assert_eq!(cli.global.plugins.as_deref(), Some("go/v4"));
        assert_eq!(cli.global.project_version.as_deref(), Some("3"));
    }

    #[test]
    fn plugins_defaults_to_table() {
        let cli = Cli::parse_from(["opscaff", "ls"]);
        match cli.command {
            Commands::Plugins(args) => {
                assert_eq!(args.format, ListFormat::Table);
                assert!(args.key.is_none());
                assert!(args.project_version_filter.is_none());
            }
            other => panic!("expected plugins command, got {other:?}"),
        }
    }

    #[test]
    fn config_init_force() {
        let cli = Cli::parse_from(["opscaff", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["opscaff", "--quiet", "--verbose", "plugins"]);
        assert!(result.is_err());
    }
}
