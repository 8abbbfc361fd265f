//! # Classifier Module
//!
//! This module decides, from a path alone, whether a file is eligible for a
//! license header and which [`FileCategory`] it belongs to.
//!
//! Classification never looks at file content. Rules are applied in order and
//! the first exclusion wins:
//!
//! 1. excluded file name
//! 2. excluded ancestor directory
//! 3. unsupported extension
//! 4. test/spec file (unless test files are included)

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Component, Path};
use std::sync::LazyLock;

use serde::Serialize;

use crate::templates::FileCategory;

/// Directory names whose descendants are never stamped.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[
  "node_modules",
  ".git",
  ".next",
  "dist",
  "build",
  ".cache",
  "coverage",
  "__pycache__",
  ".pytest_cache",
  ".vscode",
  ".idea",
  // Database migrations
  "drizzle",
];

/// File names that are never stamped, wherever they live.
pub const DEFAULT_SKIP_FILES: &[&str] = &[
  "package-lock.json",
  "bun.lockb",
  "yarn.lock",
  ".env",
  ".env.local",
  ".env.example",
  ".gitignore",
  ".eslintrc.json",
  "tsconfig.json",
  "next.config.mjs",
  "tailwind.config.ts",
  "postcss.config.mjs",
  "jest.config.ts",
  "jest.setup.ts",
  "vitest.config.ts",
  "drizzle.config.ts",
  "components.json",
];

/// Infixes marking a test or spec file, e.g. `button.test.tsx`.
const TEST_MARKERS: &[&str] = &[".test.", ".spec."];

/// Extension (with leading dot) to category.
static EXTENSION_MAP: LazyLock<HashMap<&'static str, FileCategory>> = LazyLock::new(|| {
  HashMap::from([
    (".js", FileCategory::Script),
    (".jsx", FileCategory::Script),
    (".ts", FileCategory::Script),
    (".tsx", FileCategory::Script),
    (".mjs", FileCategory::Script),
    (".css", FileCategory::Style),
    (".scss", FileCategory::Style),
    (".sass", FileCategory::Style),
    (".html", FileCategory::Markup),
    (".htm", FileCategory::Markup),
    (".sql", FileCategory::Query),
    (".py", FileCategory::Dynamic),
    (".sh", FileCategory::Shell),
    (".bash", FileCategory::Shell),
    (".zsh", FileCategory::Shell),
  ])
});

/// Looks up the category for an extension given with its leading dot.
pub fn category_for_extension(extension: &str) -> Option<FileCategory> {
  EXTENSION_MAP.get(extension).copied()
}

/// Every category reachable through the extension map.
pub fn mapped_categories() -> HashSet<FileCategory> {
  EXTENSION_MAP.values().copied().collect()
}

/// Why a path was found ineligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum SkipReason {
  /// The file name is on the exclusion list
  ExcludedFile,
  /// An ancestor directory is on the exclusion list
  ExcludedDirectory(String),
  /// The extension maps to no category
  UnsupportedExtension,
  /// The file name carries a test/spec marker
  TestFile,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::ExcludedFile => write!(f, "excluded file name"),
      SkipReason::ExcludedDirectory(dir) => write!(f, "inside excluded directory '{dir}'"),
      SkipReason::UnsupportedExtension => write!(f, "unsupported extension"),
      SkipReason::TestFile => write!(f, "test file"),
    }
  }
}

/// Result of classifying a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
  /// The file gets the header of this category
  Eligible(FileCategory),
  /// The file is left alone
  Ineligible(SkipReason),
}

impl Classification {
  pub const fn category(&self) -> Option<FileCategory> {
    match self {
      Classification::Eligible(category) => Some(*category),
      Classification::Ineligible(_) => None,
    }
  }

  pub const fn is_eligible(&self) -> bool {
    matches!(self, Classification::Eligible(_))
  }
}

/// Directory and file names that disqualify a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSets {
  directories: HashSet<String>,
  files: HashSet<String>,
}

impl Default for ExclusionSets {
  fn default() -> Self {
    Self::builtin()
  }
}

impl ExclusionSets {
  /// The built-in exclusion lists.
  pub fn builtin() -> Self {
    Self {
      directories: DEFAULT_SKIP_DIRS.iter().map(|s| (*s).to_string()).collect(),
      files: DEFAULT_SKIP_FILES.iter().map(|s| (*s).to_string()).collect(),
    }
  }

  /// Adds extra names on top of the current sets. Nothing is ever removed.
  pub fn extend<D, F>(mut self, directories: D, files: F) -> Self
  where
    D: IntoIterator<Item = String>,
    F: IntoIterator<Item = String>,
  {
    self.directories.extend(directories);
    self.files.extend(files);
    self
  }

  pub fn is_excluded_dir(&self, name: &str) -> bool {
    self.directories.contains(name)
  }

  pub fn is_excluded_file(&self, name: &str) -> bool {
    self.files.contains(name)
  }
}

/// Maps paths to a [`Classification`].
#[derive(Debug, Clone, Default)]
pub struct FileClassifier {
  exclusions: ExclusionSets,
  include_tests: bool,
}

impl FileClassifier {
  pub const fn new(exclusions: ExclusionSets, include_tests: bool) -> Self {
    Self {
      exclusions,
      include_tests,
    }
  }

  /// Classifies a path.
  ///
  /// Every ancestor component of `path` is checked against the directory
  /// exclusions, so callers pass paths relative to the scan root.
  pub fn classify(&self, path: &Path) -> Classification {
    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("");

    if self.exclusions.is_excluded_file(file_name) {
      return Classification::Ineligible(SkipReason::ExcludedFile);
    }

    if let Some(dir) = self.excluded_ancestor(path) {
      return Classification::Ineligible(SkipReason::ExcludedDirectory(dir.to_string()));
    }

    let Some(category) = path
      .extension()
      .and_then(|ext| ext.to_str())
      .and_then(|ext| category_for_extension(&format!(".{ext}")))
    else {
      return Classification::Ineligible(SkipReason::UnsupportedExtension);
    };

    if !self.include_tests && TEST_MARKERS.iter().any(|marker| file_name.contains(marker)) {
      return Classification::Ineligible(SkipReason::TestFile);
    }

    Classification::Eligible(category)
  }

  fn excluded_ancestor<'a>(&self, path: &'a Path) -> Option<&'a str> {
    let parent = path.parent()?;
    parent.components().find_map(|component| match component {
      Component::Normal(name) => name.to_str().filter(|name| self.exclusions.is_excluded_dir(name)),
      _ => None,
    })
  }
}
