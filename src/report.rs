//! # Report Module
//!
//! This module records what happened to every file a run considered and
//! aggregates those outcomes into a [`RunSummary`]. The summary can also be
//! written out as a JSON or CSV report.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::classifier::SkipReason;
use crate::templates::FileCategory;

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileOutcome {
  /// A header was written to the file
  Added,
  /// A header would have been written (dry run)
  WouldAdd,
  /// The file already carries a license header
  AlreadyLicensed,
  /// The file is not valid UTF-8 text
  Binary,
  /// The file did not pass classification
  Ineligible,
  /// Reading or writing the file failed
  Error,
}

impl FileOutcome {
  /// Counts towards the modified total.
  pub const fn is_modified(self) -> bool {
    matches!(self, FileOutcome::Added | FileOutcome::WouldAdd)
  }

  /// Counts towards the skipped total.
  pub const fn is_skipped(self) -> bool {
    matches!(
      self,
      FileOutcome::AlreadyLicensed | FileOutcome::Binary | FileOutcome::Ineligible
    )
  }

  pub const fn is_error(self) -> bool {
    matches!(self, FileOutcome::Error)
  }
}

impl fmt::Display for FileOutcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      FileOutcome::Added => "added",
      FileOutcome::WouldAdd => "would_add",
      FileOutcome::AlreadyLicensed => "already_licensed",
      FileOutcome::Binary => "binary",
      FileOutcome::Ineligible => "ineligible",
      FileOutcome::Error => "error",
    };
    f.write_str(label)
  }
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Category the file was classified into, if eligible
  pub category: Option<FileCategory>,
  /// What happened to the file
  pub outcome: FileOutcome,
  /// Why the file was ineligible, if it was
  #[serde(skip_serializing_if = "Option::is_none")]
  pub skip_reason: Option<SkipReason>,
  /// Human-readable description of the outcome
  pub message: String,
}

impl FileReport {
  pub fn new(path: impl Into<PathBuf>, category: Option<FileCategory>, outcome: FileOutcome, message: String) -> Self {
    Self {
      path: path.into(),
      category,
      outcome,
      skip_reason: None,
      message,
    }
  }

  /// Report for a file that failed classification.
  pub fn ineligible(path: impl Into<PathBuf>, reason: SkipReason) -> Self {
    let path = path.into();
    let message = format!("Skipped ({reason}): {}", path.display());
    Self {
      path,
      category: None,
      outcome: FileOutcome::Ineligible,
      skip_reason: Some(reason),
      message,
    }
  }

  /// Report for a file whose read or write failed.
  pub fn error(path: impl Into<PathBuf>, category: Option<FileCategory>, error: &anyhow::Error) -> Self {
    Self::new(path, category, FileOutcome::Error, format!("{error:#}"))
  }
}

/// Helper module for serializing PathBuf
mod path_serialization {
  use serde::Serializer;

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }
}

/// Aggregate of a run.
///
/// Counts only ever grow while the run is in progress.
#[derive(Debug, Clone)]
pub struct RunSummary {
  /// The resolved scan root
  pub root: PathBuf,
  /// Whether the run was a dry run
  pub dry_run: bool,
  /// Files considered
  pub total: usize,
  /// Files stamped (or that would be, in a dry run)
  pub modified: usize,
  /// Files left alone
  pub skipped: usize,
  /// Files whose read or write failed
  pub errored: usize,
  /// Whether the walk was cut short by an interrupt
  pub interrupted: bool,
  /// Wall time of the run
  pub elapsed: Duration,
  /// Per-file outcomes, in walk order
  pub reports: Vec<FileReport>,
}

impl RunSummary {
  pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
    Self {
      root: root.into(),
      dry_run,
      total: 0,
      modified: 0,
      skipped: 0,
      errored: 0,
      interrupted: false,
      elapsed: Duration::ZERO,
      reports: Vec::new(),
    }
  }

  /// Adds a file outcome to the summary.
  pub fn record(&mut self, report: FileReport) -> &FileReport {
    self.total += 1;
    if report.outcome.is_modified() {
      self.modified += 1;
    } else if report.outcome.is_error() {
      self.errored += 1;
    } else if report.outcome.is_skipped() {
      self.skipped += 1;
    }

    self.reports.push(report);
    &self.reports[self.reports.len() - 1]
  }

  pub const fn has_errors(&self) -> bool {
    self.errored > 0
  }

  /// Reports with the given outcome.
  pub fn with_outcome(&self, outcome: FileOutcome) -> impl Iterator<Item = &FileReport> {
    self.reports.iter().filter(move |r| r.outcome == outcome)
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

/// Writes a [`RunSummary`] to disk in a given format.
pub struct ReportGenerator<'a> {
  format: ReportFormat,
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  /// Renders the report and writes it to the output path.
  pub fn generate(&self, summary: &RunSummary) -> Result<()> {
    let content = match self.format {
      ReportFormat::Json => Self::generate_json(summary)?,
      ReportFormat::Csv => Self::generate_csv(summary),
    };

    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }

  fn generate_json(summary: &RunSummary) -> Result<String> {
    use serde_json::{json, to_string_pretty};

    let report = json!({
      "generated_at": Local::now().to_rfc3339(),
      "root": summary.root.to_string_lossy(),
      "dry_run": summary.dry_run,
      "interrupted": summary.interrupted,
      "summary": {
        "processed": summary.total,
        "modified": summary.modified,
        "skipped": summary.skipped,
        "errors": summary.errored,
        "processing_time_seconds": summary.elapsed.as_secs_f64(),
      },
      "files": summary.reports,
    });

    Ok(to_string_pretty(&report)?)
  }

  fn generate_csv(summary: &RunSummary) -> String {
    let mut csv = String::from("file_path,category,outcome,message\n");

    for file in &summary.reports {
      let category = file.category.map(|c| c.key()).unwrap_or_default();
      csv.push_str(&format!(
        "{},{},{},{}\n",
        escape_csv(&file.path.to_string_lossy()),
        category,
        file.outcome,
        escape_csv(&file.message)
      ));
    }

    csv.push_str("\n# Summary\n");
    csv.push_str(&format!("Files processed,{}\n", summary.total));
    csv.push_str(&format!("Modified,{}\n", summary.modified));
    csv.push_str(&format!("Skipped,{}\n", summary.skipped));
    csv.push_str(&format!("Errors,{}\n", summary.errored));
    csv.push_str(&format!(
      "Processing time (seconds),{:.2}\n",
      summary.elapsed.as_secs_f64()
    ));
    csv.push_str(&format!("Generated on,{}\n", Local::now().format("%Y-%m-%d %H:%M:%S")));

    csv
  }
}

fn escape_csv(field: &str) -> String {
  field.replace(',', "%2C").replace('\n', " ")
}
