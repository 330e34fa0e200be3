//! Tracing subscriber set-up.
//!
//! The library crates only emit events; this is the one place a subscriber
//! is installed. `-q` gives ERROR, no flag WARN, and each `-v` one level more
//! down to TRACE. `RUST_LOG` replaces the whole filter when set.

use std::io::{self, IsTerminal as _};

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Every crate in the workspace that emits events.
const TARGETS: [&str; 3] = ["opscaff", "opscaff_core", "opscaff_adapters"];

/// Install the global subscriber. Fails if one is already set.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => workspace_filter(level_for(args))?,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(!args.no_color && io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("tracing subscriber already installed")
}

fn workspace_filter(level: LevelFilter) -> anyhow::Result<EnvFilter> {
    TARGETS.iter().try_fold(EnvFilter::new("off"), |filter, target| {
        let directive = format!("{target}={level}")
            .parse()
            .with_context(|| format!("bad log directive for {target}"))?;
        Ok(filter.add_directive(directive))
    })
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            ..GlobalArgs::default()
        }
    }

    #[test]
    fn verbosity_steps() {
        let expected = [
            LevelFilter::WARN,
            LevelFilter::INFO,
            LevelFilter::DEBUG,
            LevelFilter::TRACE,
            LevelFilter::TRACE,
        ];
        for (count, level) in expected.into_iter().enumerate() {
            assert_eq!(level_for(&args(count as u8, false)), level);
        }
    }

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(level_for(&args(0, true)), LevelFilter::ERROR);
        assert_eq!(level_for(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn filter_names_every_crate() {
        let rendered = workspace_filter(LevelFilter::DEBUG).unwrap().to_string();
        for target in TARGETS {
            assert!(rendered.contains(&format!("{target}=debug")), "{rendered}");
        }
    }
}
