//! `opscaff`: resolve which plugins drive each scaffolding subcommand of a
//! Kubernetes operator project.
//!
//! Exit codes: 0 success, 1 internal, 2 bad input, 3 not found,
//! 4 configuration (config file, `PROJECT` file, missing project version).

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use opscaff_core::domain::Capability;

use crate::{
    cli::{Cli, Commands, CreateCommands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // .env may carry OPSCAFF_* and RUST_LOG, so it goes first.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version come through here too.
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("Failed to initialise logging: {e:#}");
        return ExitCode::from(1);
    }
    debug!(command = ?cli.command, "arguments parsed");

    let verbose = cli.global.verbose > 0;
    let color = !cli.global.no_color && io::stderr().is_terminal();
    let outcome = AppConfig::load(cli.global.config.as_deref())
        .map_err(|e| CliError::ConfigError {
            message: format!("{e:#}"),
            source: None,
        })
        .and_then(|config| {
            let output = OutputManager::new(&cli.global, &config);
            run(cli, config, output)
        });

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            err.log();
            eprint!("{}", err.report(verbose, color));
            ExitCode::from(err.exit_code())
        }
    }
}

#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    use commands::scaffold;

    let Cli { global, command } = cli;
    match command {
        Commands::Init => scaffold::execute(Capability::Init, global, config, output),
        Commands::Create(CreateCommands::Api) => {
            scaffold::execute(Capability::CreateApi, global, config, output)
        }
        Commands::Create(CreateCommands::Webhook) => {
            scaffold::execute(Capability::CreateWebhook, global, config, output)
        }
        Commands::Edit => scaffold::execute(Capability::Edit, global, config, output),
        Commands::Plugins(args) => commands::plugins::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, global, config, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_comes_from_cargo() {
        assert_eq!(Cli::command().get_version(), Some(env!("CARGO_PKG_VERSION")));
    }
}
