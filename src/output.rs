//! # Output Module
//!
//! This module centralizes all user-facing output for the headerstamp tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! Everything except error lines is suppressed in quiet mode; skipped files
//! and per-file detail lines only appear with `-v`.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::report::{FileReport, RunSummary};

/// Symbols used in output
pub mod symbols {
  /// Header added
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Skipped (verbose mode)
  pub const SKIPPED: &str = "-";
}

/// Print the "Scanning directory: ..." line that starts a run.
pub fn print_scan_start(root: &Path) {
  if is_quiet() {
    return;
  }

  println!("Scanning directory: {}", root.display());
}

/// Print how many eligible source files were found.
pub fn print_found(eligible: usize) {
  if is_quiet() {
    return;
  }

  if eligible == 0 {
    println!("No source files found.");
  } else {
    println!("Found {} source files", eligible);
  }
}

pub fn print_dry_run_banner() {
  if is_quiet() {
    return;
  }

  println!(
    "\n{}\n",
    "=== DRY RUN MODE ===".if_supports_color(Stream::Stdout, |s| s.yellow())
  );
}

/// Print the per-file line for a processed file.
///
/// - modified: `✓ <path>`
/// - errored: `✗ Error processing <path>: <error>` (shown even when quiet)
/// - skipped: `- <path> (skipped)`, verbose only
///
/// In verbose mode every non-error line is followed by the indented outcome
/// message.
pub fn print_file_report(report: &FileReport) {
  let outcome = report.outcome;

  if outcome.is_error() {
    println!(
      "{} Error processing {}: {}",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
      report.path.display(),
      report.message
    );
    return;
  }

  if is_quiet() {
    return;
  }

  if outcome.is_modified() {
    println!(
      "{} {}",
      symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
      report.path.display()
    );
  } else if is_verbose() {
    println!(
      "{} {} (skipped)",
      symbols::SKIPPED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      report.path.display()
    );
  } else {
    return;
  }

  if is_verbose() {
    println!("  {}", report.message.if_supports_color(Stream::Stdout, |s| s.dimmed()));
  }
}

/// Print the end-of-run summary block.
///
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &RunSummary) {
  if is_quiet() {
    return;
  }

  let errors = if summary.errored > 0 {
    summary
      .errored
      .if_supports_color(Stream::Stdout, |s| s.red())
      .to_string()
  } else {
    summary.errored.to_string()
  };

  println!();
  println!("=== SUMMARY ===");
  println!("Files processed: {}", summary.total);
  println!(
    "Modified: {}",
    summary.modified.if_supports_color(Stream::Stdout, |s| s.cyan())
  );
  println!("Skipped: {}", summary.skipped);
  println!("Errors: {}", errors);

  if summary.interrupted {
    println!(
      "{}",
      "Interrupted: remaining files were not processed".if_supports_color(Stream::Stdout, |s| s.yellow())
    );
  }

  if is_verbose() {
    println!("Time: {:.2}s", summary.elapsed.as_secs_f64());
  }
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("\n{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to the current directory for display.
///
/// Falls back to the path itself when no relative form exists.
pub fn display_path(path: &Path) -> String {
  std::env::current_dir()
    .ok()
    .and_then(|cwd| pathdiff::diff_paths(path, cwd))
    .filter(|relative| !relative.as_os_str().is_empty())
    .unwrap_or_else(|| path.to_path_buf())
    .to_string_lossy()
    .into_owned()
}
