//! # Injector Module
//!
//! This module stamps a single file: it reads the content, asks the
//! [`LicenseDetector`] whether a header is already there, composes the new
//! content and either writes it or, in a dry run, previews it.

use std::path::Path;

use anyhow::Result;
use tracing::trace;

use super::content_transformer::ContentTransformer;
use super::file_io::{FileIO, FileText};
use crate::diff::DiffManager;
use crate::license_detection::LicenseDetector;
use crate::report::FileOutcome;
use crate::templates::{FileCategory, HeaderRegistry};

/// Result of stamping one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectOutcome {
  /// The header was written
  Added,
  /// The header would have been written (dry run)
  WouldAdd,
  /// The file already has a license header
  AlreadyLicensed,
  /// The file is not text
  Binary,
}

impl InjectOutcome {
  /// Whether the file was (or would be) changed.
  pub const fn changed(self) -> bool {
    matches!(self, InjectOutcome::Added | InjectOutcome::WouldAdd)
  }

  /// Describes the outcome for `path`.
  pub fn message(self, path: &Path) -> String {
    let path = path.display();
    match self {
      InjectOutcome::Added => format!("Added license to: {path}"),
      InjectOutcome::WouldAdd => format!("Would add license to: {path}"),
      InjectOutcome::AlreadyLicensed => format!("Already has license: {path}"),
      InjectOutcome::Binary => format!("Skipped (binary file): {path}"),
    }
  }
}

impl From<InjectOutcome> for FileOutcome {
  fn from(outcome: InjectOutcome) -> Self {
    match outcome {
      InjectOutcome::Added => FileOutcome::Added,
      InjectOutcome::WouldAdd => FileOutcome::WouldAdd,
      InjectOutcome::AlreadyLicensed => FileOutcome::AlreadyLicensed,
      InjectOutcome::Binary => FileOutcome::Binary,
    }
  }
}

/// Adds headers to individual files.
pub struct HeaderInjector {
  registry: HeaderRegistry,
  detector: Box<dyn LicenseDetector>,
  diff_manager: DiffManager,
}

impl HeaderInjector {
  pub fn new(registry: HeaderRegistry, detector: Box<dyn LicenseDetector>, diff_manager: DiffManager) -> Self {
    Self {
      registry,
      detector,
      diff_manager,
    }
  }

  /// Checks whether content already carries a license header.
  pub fn has_license(&self, content: &str) -> bool {
    self.detector.has_license(content)
  }

  /// Stamps the file at `path` with the header for `category`.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or written, or if the
  /// category has no registered header. Binary content is not an error.
  pub fn inject(&self, path: &Path, category: FileCategory, dry_run: bool) -> Result<InjectOutcome> {
    let content = match FileIO::read_text(path)? {
      FileText::Text(content) => content,
      FileText::Binary => {
        trace!("Skipping: {} (binary)", path.display());
        return Ok(InjectOutcome::Binary);
      }
    };

    if self.has_license(&content) {
      trace!("Skipping: {} (already licensed)", path.display());
      return Ok(InjectOutcome::AlreadyLicensed);
    }

    let header = self.registry.header_for(category)?;
    let new_content = ContentTransformer::compose(category.strategy(), header, &content);

    if dry_run {
      if let Err(e) = self.diff_manager.display_diff(path, &content, &new_content) {
        eprintln!("Warning: Failed to display diff for {}: {e:#}", path.display());
      }
      return Ok(InjectOutcome::WouldAdd);
    }

    FileIO::write_file(path, &new_content)?;
    trace!("Stamped {} header onto {}", category, path.display());

    Ok(InjectOutcome::Added)
  }
}
