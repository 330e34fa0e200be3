//! Terminal output.
//!
//! Results go to stdout; warnings go to stderr so that `--output-format json`
//! stays parseable when deprecation notices are printed.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::CliResult;

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format`; `auto` becomes
    /// [`OutputFormat::Human`] on a TTY and [`OutputFormat::Plain`] otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_config(&config.output.format).unwrap_or(OutputFormat::Auto)
            }
            explicit => explicit,
        };
        let format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color && !config.output.no_color,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(&self.stdout, msg.to_owned())
    }

    /// Pretty JSON on stdout. Written even with `--quiet`.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        self.stdout.write_line(&serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        let green = Style::new().green();
        self.emit(&self.stdout, self.marked('\u{2713}', green, msg)) // ✓
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        let blue = Style::new().blue();
        self.emit(&self.stdout, self.marked('\u{2139}', blue, msg)) // ℹ
    }

    /// Written to stderr.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        let yellow = Style::new().yellow();
        self.emit(&self.stderr, self.marked('\u{26a0}', yellow, msg)) // ⚠
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.emit(&self.stdout, self.paint(text, Style::new().cyan().bold()))
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(text, Style::new().dimmed())
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }

    fn marked(&self, glyph: char, style: Style, msg: &str) -> String {
        format!(
            "{} {}",
            self.paint(&glyph.to_string(), style.bold()),
            self.paint(msg, style)
        )
    }

    fn emit(&self, term: &Term, line: String) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        term.write_line(&line)
    }
}
