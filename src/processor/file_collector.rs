//! # File Collector Module
//!
//! This module walks the scan root and lists every regular file beneath it in
//! a deterministic order.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::interrupt::InterruptFlag;

/// One item produced by the walk.
#[derive(Debug)]
pub enum WalkEntry {
  /// A regular file
  File(PathBuf),
  /// An entry that could not be read (e.g. a directory without permission)
  Failed { path: PathBuf, error: anyhow::Error },
}

/// File collector for directory traversal.
pub struct FileCollector {
  root: PathBuf,
}

impl FileCollector {
  pub const fn new(root: PathBuf) -> Self {
    Self { root }
  }

  /// Walks the root recursively and returns every regular file, sorted by
  /// file name at each level.
  ///
  /// Directories and symlinks are not returned. Stops early, returning what
  /// was found so far, if `interrupt` is raised.
  pub fn collect(&self, interrupt: &InterruptFlag) -> Vec<WalkEntry> {
    let mut entries = Vec::new();

    debug!("Scanning directory: {}", self.root.display());
    let start_time = std::time::Instant::now();

    for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
      if interrupt.is_raised() {
        debug!("Walk interrupted after {} entries", entries.len());
        break;
      }

      match entry {
        Ok(entry) => {
          let file_type = entry.file_type();
          if file_type.is_file() {
            entries.push(WalkEntry::File(entry.into_path()));
          } else if file_type.is_symlink() {
            trace!("Skipping: {} (symlink)", entry.path().display());
          }
        }
        Err(e) => {
          let path = e.path().map_or_else(|| self.root.clone(), Path::to_path_buf);
          let error = anyhow!(e).context(format!("Failed to read directory entry: {}", path.display()));
          entries.push(WalkEntry::Failed { path, error });
        }
      }
    }

    debug!(
      "Found {} entries in {}ms",
      entries.len(),
      start_time.elapsed().as_millis()
    );

    entries
  }
}
