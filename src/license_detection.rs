//! # License Detection Module
//!
//! This module contains the interfaces and implementations for license detection algorithms.
//! It allows for easily replacing the license detection algorithm without modifying the processor.

use regex::{RegexSet, RegexSetBuilder};

/// Number of leading lines inspected for a license header.
pub const DETECTION_WINDOW_LINES: usize = 20;

/// Trait for license detectors.
///
/// Implementations of this trait are responsible for determining whether a file
/// already contains a license header based on its content.
pub trait LicenseDetector: Send + Sync {
  /// Checks if the content already has a license header.
  ///
  /// # Parameters
  ///
  /// * `content` - The file content to check
  ///
  /// # Returns
  ///
  /// `true` if the content appears to have a license header, `false` otherwise.
  fn has_license(&self, content: &str) -> bool;
}

/// Default implementation of license detection.
///
/// Looks for any of a small set of marker phrases, case-insensitively, in the
/// first [`DETECTION_WINDOW_LINES`] lines:
///
/// - `copyright ... <holder>`
/// - `licensed under ... mit`
/// - `see license file`
/// - `mit license`
///
/// Any match counts as licensed, so the check errs towards leaving files alone.
/// Phrases are matched within a single line.
pub struct MarkerPhraseDetector {
  markers: RegexSet,
}

impl MarkerPhraseDetector {
  /// Creates a detector whose copyright marker names `holder`.
  ///
  /// # Errors
  ///
  /// Returns an error if the patterns exceed the regex size limit, which only
  /// an unreasonably long holder name can cause.
  pub fn new(holder: &str) -> Result<Self, regex::Error> {
    let patterns = [
      format!(r"copyright.*{}", regex::escape(holder)),
      r"licensed under.*mit".to_string(),
      r"see license file".to_string(),
      r"mit license".to_string(),
    ];

    let markers = RegexSetBuilder::new(&patterns)
      .case_insensitive(true)
      .build()?;

    Ok(Self { markers })
  }
}

impl LicenseDetector for MarkerPhraseDetector {
  fn has_license(&self, content: &str) -> bool {
    let window_end = content
      .match_indices('\n')
      .nth(DETECTION_WINDOW_LINES - 1)
      .map_or(content.len(), |(idx, _)| idx);

    self.markers.is_match(&content[..window_end])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::templates::DEFAULT_HOLDER;

  impl Default for MarkerPhraseDetector {
    fn default() -> Self {
      Self::new(DEFAULT_HOLDER).unwrap()
    }
  }

  #[test]
  fn test_marker_phrase_detector() {
    let detector = MarkerPhraseDetector::default();

    let content_with_license = "/**\n * Copyright (c) 2025 xDJs LLC\n */\n\nexport {}";
    assert!(detector.has_license(content_with_license));

    let python_docstring = "\"\"\"\nCopyright (c) 2024 Someone Else\nMIT License\n\"\"\"\nimport os";
    assert!(detector.has_license(python_docstring));

    let licensed_under = "// This file is Licensed under the terms of the MIT agreement\n";
    assert!(detector.has_license(licensed_under));

    let see_license = "# see LICENSE file for details\n";
    assert!(detector.has_license(see_license));

    let content_without_license = "function main() {\n  console.log('No license in this code');\n}";
    assert!(!detector.has_license(content_without_license));
  }

  #[test]
  fn test_case_insensitive_holder() {
    let detector = MarkerPhraseDetector::default();
    assert!(detector.has_license("// COPYRIGHT 2021 XDJS LLC\n"));
  }

  #[test]
  fn test_other_holder_needs_other_phrase() {
    let detector = MarkerPhraseDetector::default();
    // A bare copyright line for a different holder is not a marker
    assert!(!detector.has_license("// Copyright 2021 Someone Else\nlet x = 1;\n"));

    let detector = MarkerPhraseDetector::new("Someone Else").unwrap();
    assert!(detector.has_license("// Copyright 2021 Someone Else\nlet x = 1;\n"));
  }

  #[test]
  fn test_holder_is_matched_literally() {
    let detector = MarkerPhraseDetector::new("A.B (Labs)").unwrap();
    assert!(detector.has_license("# Copyright A.B (Labs)\n"));
    assert!(!detector.has_license("# Copyright AxB Labs\n"));
  }

  #[test]
  fn test_phrase_must_sit_on_one_line() {
    let detector = MarkerPhraseDetector::default();
    assert!(!detector.has_license("// licensed under\n// the permissive terms\n// of M.I.T.\n"));
  }

  #[test]
  fn test_window_bound() {
    let detector = MarkerPhraseDetector::default();

    let mut inside = "line\n".repeat(DETECTION_WINDOW_LINES - 1);
    inside.push_str("// MIT License\n");
    assert!(detector.has_license(&inside));

    let mut outside = "line\n".repeat(DETECTION_WINDOW_LINES);
    outside.push_str("// MIT License\n");
    assert!(!detector.has_license(&outside));

    let mut far = "line\n".repeat(25);
    far.push_str("// Copyright (c) 2025 xDJs LLC\n");
    assert!(!detector.has_license(&far));
  }

  #[test]
  fn test_loose_mit_mention_counts() {
    // Permissive on purpose: any MIT License mention suppresses stamping
    let detector = MarkerPhraseDetector::default();
    assert!(detector.has_license("// Ported from a project under the MIT license.\n"));
  }

  #[test]
  fn test_empty_content() {
    let detector = MarkerPhraseDetector::default();
    assert!(!detector.has_license(""));
  }
}
