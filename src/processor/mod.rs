//! # Processor Module
//!
//! This module contains the core functionality for walking a directory tree
//! and stamping license headers onto the eligible files in it.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - File reading and atomic writing
//! - [`content_transformer`] - Composition of new file content (shebang handling)
//! - [`file_collector`] - Sorted directory traversal
//! - [`injector`] - Detection and stamping of a single file
//!
//! The [`Processor`] struct is the main entry point, orchestrating the
//! submodules into a single sequential run.

mod content_transformer;
mod file_collector;
mod file_io;
mod injector;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
pub use content_transformer::ContentTransformer;
pub use file_collector::{FileCollector, WalkEntry};
pub use file_io::{FileIO, FileText};
pub use injector::{HeaderInjector, InjectOutcome};
use tracing::debug;

use crate::classifier::{self, Classification, FileClassifier};
use crate::diff::DiffManager;
use crate::interrupt::InterruptFlag;
use crate::license_detection::{LicenseDetector, MarkerPhraseDetector};
use crate::output;
use crate::report::{FileReport, RunSummary};
use crate::templates::HeaderRegistry;

/// Error type for conditions that abort a whole run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
  /// The directory to scan does not exist.
  #[error("Directory {} does not exist", .0.display())]
  RootNotFound(PathBuf),

  /// The path to scan is not a directory.
  #[error("{} is not a directory", .0.display())]
  RootNotDirectory(PathBuf),
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub registry: HeaderRegistry,
  pub classifier: FileClassifier,

  /// Compute and report changes without writing them
  pub dry_run: bool,

  // Optional components
  pub license_detector: Option<Box<dyn LicenseDetector>>,
  pub diff_manager: Option<DiffManager>,
  pub interrupt: Option<InterruptFlag>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     dry_run: true,
  ///     ..ProcessorConfig::new(registry)
  /// }
  /// ```
  pub fn new(registry: HeaderRegistry) -> Self {
    Self {
      registry,
      classifier: FileClassifier::default(),
      dry_run: false,
      license_detector: None,
      diff_manager: None,
      interrupt: None,
    }
  }
}

/// A file under consideration during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
  /// Absolute path of the file
  pub path: PathBuf,
  /// Path relative to the scan root, used for classification and display
  pub relative_path: PathBuf,
  /// Result of classifying `relative_path`
  pub classification: Classification,
  /// Whether a license header was detected; `None` until the file is inspected
  pub already_licensed: Option<bool>,
}

/// Processor for stamping license headers onto a directory tree.
///
/// The `Processor` is responsible for:
/// - Walking the tree in sorted order
/// - Classifying each file exactly once
/// - Stamping eligible files that have no header yet
/// - Collecting a [`RunSummary`] of every outcome
///
/// Files are handled one at a time. A failure on one file is recorded and the
/// run moves on to the next.
pub struct Processor {
  classifier: FileClassifier,
  injector: HeaderInjector,
  dry_run: bool,
  interrupt: InterruptFlag,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  ///
  /// # Errors
  ///
  /// Returns an error if a category reachable from the extension map has no
  /// header in the registry.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    config
      .registry
      .ensure_covers(classifier::mapped_categories())
      .context("Header registry does not cover every file category")?;

    let license_detector = match config.license_detector {
      Some(detector) => detector,
      None => Box::new(
        MarkerPhraseDetector::new(config.registry.holder())
          .context("Failed to build license marker patterns")?,
      ),
    };
    let diff_manager = config.diff_manager.unwrap_or_default();

    Ok(Self {
      classifier: config.classifier,
      injector: HeaderInjector::new(config.registry, license_detector, diff_manager),
      dry_run: config.dry_run,
      interrupt: config.interrupt.unwrap_or_default(),
    })
  }

  /// Resolves the directory to scan to an absolute path.
  ///
  /// # Errors
  ///
  /// Returns [`RunError::RootNotFound`] or [`RunError::RootNotDirectory`].
  pub fn resolve_root(root: &Path) -> Result<PathBuf, RunError> {
    if !root.exists() {
      return Err(RunError::RootNotFound(absolute_or_self(root)));
    }
    let resolved = root.canonicalize().unwrap_or_else(|_| absolute_or_self(root));
    if !resolved.is_dir() {
      return Err(RunError::RootNotDirectory(resolved));
    }
    Ok(resolved)
  }

  /// Builds the candidate for a file found under `root`.
  pub fn classify(&self, root: &Path, path: PathBuf) -> CandidateFile {
    let relative_path = path.strip_prefix(root).map(Path::to_path_buf).unwrap_or_else(|_| path.clone());
    let classification = self.classifier.classify(&relative_path);

    CandidateFile {
      path,
      relative_path,
      classification,
      already_licensed: None,
    }
  }

  /// Stamps one candidate and describes what happened.
  ///
  /// I/O failures become an error report; they are never returned.
  pub fn process_candidate(&self, candidate: &mut CandidateFile) -> FileReport {
    let category = match &candidate.classification {
      Classification::Eligible(category) => *category,
      Classification::Ineligible(reason) => {
        return FileReport::ineligible(&candidate.relative_path, reason.clone());
      }
    };

    match self.injector.inject(&candidate.path, category, self.dry_run) {
      Ok(outcome) => {
        candidate.already_licensed = match outcome {
          InjectOutcome::Binary => None,
          InjectOutcome::AlreadyLicensed => Some(true),
          InjectOutcome::Added | InjectOutcome::WouldAdd => Some(false),
        };
        FileReport::new(
          &candidate.relative_path,
          Some(category),
          outcome.into(),
          outcome.message(&candidate.relative_path),
        )
      }
      Err(e) => FileReport::error(&candidate.relative_path, Some(category), &e),
    }
  }

  /// Runs over every file under `root`.
  ///
  /// # Errors
  ///
  /// Only fails if `root` is missing or not a directory. Per-file failures are
  /// counted in the returned summary.
  pub fn run(&self, root: &Path) -> Result<RunSummary, RunError> {
    let root = Self::resolve_root(root)?;
    let start_time = Instant::now();
    let mut summary = RunSummary::new(&root, self.dry_run);

    output::print_scan_start(&root);

    let collector = FileCollector::new(root.clone());
    let mut candidates = Vec::new();
    for entry in collector.collect(&self.interrupt) {
      match entry {
        WalkEntry::File(path) => candidates.push(self.classify(&root, path)),
        WalkEntry::Failed { path, error } => {
          let relative = path.strip_prefix(&root).unwrap_or(&path).to_path_buf();
          let report = summary.record(FileReport::error(relative, None, &error));
          output::print_file_report(report);
        }
      }
    }

    let eligible = candidates.iter().filter(|c| c.classification.is_eligible()).count();
    debug!(
      "Classified {} files: {} eligible, {} ineligible",
      candidates.len(),
      eligible,
      candidates.len() - eligible
    );
    output::print_found(eligible);
    if self.dry_run {
      output::print_dry_run_banner();
    }

    for mut candidate in candidates {
      if self.interrupt.is_raised() {
        break;
      }
      let report = summary.record(self.process_candidate(&mut candidate));
      output::print_file_report(report);
    }

    summary.interrupted = self.interrupt.is_raised();
    summary.elapsed = start_time.elapsed();

    debug!(
      "Processed {} files in {}ms",
      summary.total,
      summary.elapsed.as_millis()
    );

    Ok(summary)
  }
}

fn absolute_or_self(path: &Path) -> PathBuf {
  std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;
  use crate::classifier::SkipReason;
  use crate::report::FileOutcome;
  use crate::templates::{DEFAULT_HOLDER, FileCategory, LicenseData};

  fn processor(dry_run: bool) -> Processor {
    let registry = HeaderRegistry::new(&LicenseData::new(DEFAULT_HOLDER, "2025")).unwrap();
    Processor::new(ProcessorConfig {
      dry_run,
      ..ProcessorConfig::new(registry)
    })
    .unwrap()
  }

  #[test]
  fn test_classify_is_relative_to_root() {
    let processor = processor(false);
    let root = Path::new("/home/dev/build/project");
    let candidate = processor.classify(root, root.join("src/app.ts"));

    // "build" above the root does not exclude anything
    assert_eq!(candidate.classification, Classification::Eligible(FileCategory::Script));
    assert_eq!(candidate.relative_path, PathBuf::from("src/app.ts"));
    assert_eq!(candidate.already_licensed, None);
  }

  #[test]
  fn test_process_candidate_sets_detection_flag() {
    let dir = tempdir().unwrap();
    let processor = processor(false);
    fs::write(dir.path().join("a.py"), "print('hi')\n").unwrap();

    let mut candidate = processor.classify(dir.path(), dir.path().join("a.py"));
    let report = processor.process_candidate(&mut candidate);
    assert_eq!(report.outcome, FileOutcome::Added);
    assert_eq!(candidate.already_licensed, Some(false));

    let mut again = processor.classify(dir.path(), dir.path().join("a.py"));
    let report = processor.process_candidate(&mut again);
    assert_eq!(report.outcome, FileOutcome::AlreadyLicensed);
    assert_eq!(again.already_licensed, Some(true));
  }

  #[test]
  fn test_ineligible_candidate_report() {
    let processor = processor(false);
    let root = Path::new("/project");
    let mut candidate = processor.classify(root, root.join("node_modules/x.js"));

    let report = processor.process_candidate(&mut candidate);
    assert_eq!(report.outcome, FileOutcome::Ineligible);
    assert_eq!(
      report.skip_reason,
      Some(SkipReason::ExcludedDirectory("node_modules".to_string()))
    );
  }

  #[test]
  fn test_run_missing_root() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");

    let err = processor(false).run(&missing).unwrap_err();
    assert!(matches!(err, RunError::RootNotFound(_)));
    assert!(err.to_string().contains("does not exist"));
  }

  #[test]
  fn test_run_root_is_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.js");
    fs::write(&file, "").unwrap();

    assert!(matches!(
      processor(false).run(&file).unwrap_err(),
      RunError::RootNotDirectory(_)
    ));
  }

  #[test]
  fn test_run_counts() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "let a;\n").unwrap();
    fs::write(dir.path().join("b.py"), "\"\"\"\nMIT License\n\"\"\"\n").unwrap();
    fs::write(dir.path().join("README.md"), "# readme\n").unwrap();

    let summary = processor(false).run(dir.path()).unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.modified, 1);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.errored, 0);
    assert!(!summary.interrupted);
  }

  #[test]
  fn test_run_stops_when_interrupted() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "let a;\n").unwrap();

    let interrupt = InterruptFlag::new();
    interrupt.trigger();
    let registry = HeaderRegistry::new(&LicenseData::new(DEFAULT_HOLDER, "2025")).unwrap();
    let processor = Processor::new(ProcessorConfig {
      interrupt: Some(interrupt),
      ..ProcessorConfig::new(registry)
    })
    .unwrap();

    let summary = processor.run(dir.path()).unwrap();
    assert!(summary.interrupted);
    assert_eq!(summary.total, 0);
    assert_eq!(fs::read_to_string(dir.path().join("a.js")).unwrap(), "let a;\n");
  }
}
