//! # Run Command
//!
//! This module implements the stamping run: it resolves the directory, merges
//! the config file with the command-line flags, runs the [`Processor`] and
//! maps the result to an exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use tracing::debug;

use crate::classifier::{ExclusionSets, FileClassifier};
use crate::config::{Config, load_config};
use crate::diff::DiffManager;
use crate::info_log;
use crate::interrupt::InterruptFlag;
use crate::logging::{ColorMode, init_tracing};
use crate::output::{display_path, print_hint, print_summary};
use crate::processor::{Processor, ProcessorConfig};
use crate::report::{ReportFormat, ReportGenerator, RunSummary};
use crate::templates::{DEFAULT_HOLDER, HeaderRegistry, LicenseData};

/// Exit code used when the run is cut short by Ctrl+C.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Arguments for a stamping run
#[derive(Args, Debug, Default)]
pub struct RunArgs {
  /// Directory to scan recursively
  #[arg(value_name = "DIR", conflicts_with = "directory")]
  pub dir: Option<PathBuf>,

  /// Directory to scan recursively (alternative to the positional DIR)
  #[arg(long, short = 'd', value_name = "DIR")]
  pub directory: Option<PathBuf>,

  /// Show what would change without writing any file
  #[arg(long)]
  pub dry_run: bool,

  /// Also process *.test.* and *.spec.* files
  #[arg(long)]
  pub include_tests: bool,

  /// Increase verbosity (-v skipped files, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,

  /// Path to config file (default: .headerstamp.toml in the scanned directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Copyright holder [default: xDJs LLC]
  #[arg(long, value_name = "NAME")]
  pub holder: Option<String>,

  /// Copyright year(s) [default: current year]
  #[arg(long)]
  pub year: Option<String>,

  /// Show diff of changes in dry run mode
  #[arg(long, requires = "dry_run")]
  pub show_diff: bool,

  /// Save diff of changes to a file in dry run mode
  #[arg(long, value_name = "FILE", requires = "dry_run")]
  pub save_diff: Option<PathBuf>,

  /// Generate a JSON report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Generate a CSV report of the run and save to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,
}

impl RunArgs {
  /// The directory to scan, `.` when none was given.
  pub fn directory(&self) -> PathBuf {
    self
      .dir
      .clone()
      .or_else(|| self.directory.clone())
      .unwrap_or_else(|| PathBuf::from("."))
  }
}

/// Resolved settings after merging the config file with the flags.
///
/// Flags always take precedence over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveSettings {
  pub license: LicenseData,
  pub include_tests: bool,
  pub exclusions: ExclusionSets,
}

impl EffectiveSettings {
  pub fn merge(args: &RunArgs, config: Config) -> Self {
    let holder = args
      .holder
      .clone()
      .or(config.license.holder)
      .unwrap_or_else(|| DEFAULT_HOLDER.to_string());
    let year = args
      .year
      .clone()
      .or(config.license.year)
      .unwrap_or_else(|| chrono::Local::now().year().to_string());

    Self {
      license: LicenseData::new(holder, year),
      include_tests: args.include_tests || config.include_tests,
      exclusions: ExclusionSets::builtin().extend(config.exclude.directories, config.exclude.files),
    }
  }
}

/// Run headerstamp with the given arguments
pub fn run(args: RunArgs) -> Result<ExitCode> {
  init_tracing(args.verbose, args.quiet);
  args.colors.apply();

  let root = match Processor::resolve_root(&args.directory()) {
    Ok(root) => root,
    Err(e) => {
      eprintln!("{} {e}", "Error:".if_supports_color(Stream::Stderr, |s| s.red()));
      return Ok(ExitCode::FAILURE);
    }
  };

  let config = load_config(args.config.as_deref(), &root, args.no_config)?.unwrap_or_default();
  let settings = EffectiveSettings::merge(&args, config);
  debug!(
    "Stamping as '{}' ({}), include tests: {}",
    settings.license.holder, settings.license.year, settings.include_tests
  );

  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  diff_manager.init()?;

  let registry = HeaderRegistry::new(&settings.license).context("Failed to render header templates")?;
  let interrupt = InterruptFlag::install()?;

  let processor = Processor::new(ProcessorConfig {
    classifier: FileClassifier::new(settings.exclusions, settings.include_tests),
    dry_run: args.dry_run,
    diff_manager: Some(diff_manager),
    interrupt: Some(interrupt),
    ..ProcessorConfig::new(registry)
  })?;

  let summary = processor.run(&root)?;

  print_summary(&summary);
  if args.dry_run {
    print_hint("Run without --dry-run to apply changes.");
  }

  write_reports(&args, &summary);

  Ok(exit_code(&summary))
}

/// Writes the requested report files. Failures are reported but do not
/// change the exit code.
fn write_reports(args: &RunArgs, summary: &RunSummary) {
  let requested = [
    (ReportFormat::Json, args.report_json.as_ref()),
    (ReportFormat::Csv, args.report_csv.as_ref()),
  ];

  for (format, output_path) in requested {
    let Some(output_path) = output_path else {
      continue;
    };

    if let Err(e) = ReportGenerator::new(format, output_path).generate(summary) {
      eprintln!("Error generating {format} report: {e:#}");
    } else {
      info_log!("Generated {format} report at {}", display_path(output_path));
    }
  }
}

/// Maps a finished run to the process exit code.
pub fn exit_code(summary: &RunSummary) -> ExitCode {
  if summary.interrupted {
    ExitCode::from(INTERRUPTED_EXIT_CODE)
  } else if summary.has_errors() {
    ExitCode::FAILURE
  } else {
    ExitCode::SUCCESS
  }
}
