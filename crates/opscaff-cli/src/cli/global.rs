//! Flags shared by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

use opscaff_core::domain::key;

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// More log output: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also set by a non-empty NO_COLOR)
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Configuration file to use instead of the per-user one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output_format: OutputFormat,

    /// Project file to read [default: project.file from config, then PROJECT]
    #[arg(long, global = true, value_name = "FILE")]
    pub project_file: Option<PathBuf>,

    /// Comma separated plugin keys, e.g. go/v4,helm/v1-alpha
    #[arg(long, global = true, value_name = "KEYS")]
    pub plugins: Option<String>,

    /// Project version to resolve against, e.g. 3
    #[arg(long, global = true, value_name = "VERSION")]
    pub project_version: Option<String>,
}

impl GlobalArgs {
    /// The `--plugins` value split into keys. Empty when not given.
    pub fn plugin_keys(&self) -> Vec<String> {
        self.plugins
            .as_deref()
            .map(key::parse_key_list)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human on a terminal, plain otherwise
    #[default]
    Auto,
    /// Colored text
    Human,
    /// Text without colors
    Plain,
    /// Machine-readable JSON
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` configuration value, ignoring case.
    pub fn from_config(value: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(value.trim(), true).ok()
    }
}
