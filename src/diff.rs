//! # Diff Module
//!
//! This module renders the difference between a file's current content and
//! the content it would have after stamping. It backs the `--show-diff` and
//! `--save-diff` previews of a dry run.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for header changes.
///
/// This struct handles:
/// - Generating diffs between original and modified content
/// - Displaying diffs to stderr
/// - Appending diffs to a file
#[derive(Debug, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that diffs are appended to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the save file so a run starts from an empty diff.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Renders the diff between `original` and `new` for `path`.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut rendered = String::new();
    let _ = writeln!(rendered, "Diff for {}:", path.display());

    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      let _ = write!(rendered, "{sign}{change}");
    }

    rendered
  }

  /// Displays and/or saves the diff for one file.
  ///
  /// Diffs from several files are appended to the same save file, producing
  /// one consolidated diff.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let rendered = Self::render(path, original, new);

    if self.show_diff {
      eprintln!("{rendered}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      writeln!(file, "{rendered}").with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}
