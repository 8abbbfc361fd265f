//! # headerstamp
//!
//! A tool that stamps license headers onto source files.

use std::process::ExitCode;

use anyhow::Result;
use headerstamp::cli::{Cli, generate_completions, run};

fn main() -> Result<ExitCode> {
  let cli = Cli::parse_args();

  // Handle shell completions first
  if let Some(shell) = cli.completions {
    generate_completions(shell);
    return Ok(ExitCode::SUCCESS);
  }

  run(cli.run_args)
}
