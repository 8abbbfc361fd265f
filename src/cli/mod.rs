//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing and clap_complete for shell completions.

mod run;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
pub use run::{RunArgs, run};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "headerstamp",
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Stamp every source file under the current directory
  headerstamp

  # Preview which files would change, without writing anything
  headerstamp --dry-run src/

  # Preview with a unified diff of every change
  headerstamp --dry-run --show-diff src/

  # Use a different holder and year
  headerstamp --holder \"Acme Corp\" --year 2024 .

  # Also stamp *.test.* and *.spec.* files
  headerstamp --include-tests -d web/

  # Write a JSON report of what happened
  headerstamp --report-json report.json .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// Generate shell completions and exit
  #[arg(long, value_name = "SHELL", value_enum)]
  pub completions: Option<Shell>,

  #[command(flatten)]
  pub run_args: RunArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Write completions for `shell` to stdout.
pub fn generate_completions(shell: Shell) {
  let mut command = Cli::command();
  let name = command.get_name().to_string();
  clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
}
