//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! It encapsulates synchronous file operations.

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Content of a file as seen by the processor.
#[derive(Debug, PartialEq, Eq)]
pub enum FileText {
  /// Valid UTF-8 text
  Text(String),
  /// Content that does not decode as UTF-8
  Binary,
}

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Reads a whole file as text.
  ///
  /// Content that is not valid UTF-8 is reported as [`FileText::Binary`]
  /// rather than as an error.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be opened or read.
  pub fn read_text(path: &Path) -> Result<FileText> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    Ok(match String::from_utf8(bytes) {
      Ok(text) => FileText::Text(text),
      Err(_) => FileText::Binary,
    })
  }

  /// Replaces a file's content.
  ///
  /// The content goes to a temporary file next to `path` first, which gets
  /// the original file's permissions and is then renamed over it. Readers see
  /// either the old or the new content, never a partial write.
  ///
  /// The target is opened for writing first, so a file the current user may
  /// not write (for example mode 0444) fails here instead of being replaced.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to write
  /// * `content` - Content to write to the file
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    OpenOptions::new()
      .write(true)
      .open(path)
      .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;

    let permissions = fs::metadata(path)
      .with_context(|| format!("Failed to stat file: {}", path.display()))?
      .permissions();

    let mut temp =
      NamedTempFile::new_in(dir).with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp
      .write_all(content.as_bytes())
      .with_context(|| format!("Failed to write file: {}", path.display()))?;
    temp
      .as_file()
      .sync_all()
      .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    fs::set_permissions(temp.path(), permissions)
      .with_context(|| format!("Failed to copy permissions for: {}", path.display()))?;

    temp
      .persist(path)
      .map_err(|e| e.error)
      .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
  }
}
