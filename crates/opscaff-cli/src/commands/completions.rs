//! `opscaff completions <SHELL>` writes a completion script to stdout.

use std::io;

use clap::CommandFactory;

use crate::{
    cli::{Cli, CompletionsArgs},
    error::CliResult,
};

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, bin, &mut io::stdout());
    Ok(())
}
