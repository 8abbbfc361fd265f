//! # Templates Module
//!
//! This module owns the header templates that get stamped onto source files
//! and the categories that select between them.
//!
//! The module includes:
//! - [`FileCategory`] for the supported source-file families
//! - [`InjectionStrategy`] for how a category's header is spliced into a file
//! - [`LicenseData`] for providing data to fill in templates
//! - [`HeaderRegistry`] for the rendered, immutable category-to-header map
//!
//! ## Example
//!
//! ```rust
//! use headerstamp::templates::{FileCategory, HeaderRegistry, LicenseData};
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = LicenseData::new("Acme Corp", "2025");
//! let registry = HeaderRegistry::new(&data)?;
//!
//! let header = registry.header_for(FileCategory::Script)?;
//! assert!(header.starts_with("/**\n * Copyright (c) 2025 Acme Corp\n"));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::verbose_log;

/// Copyright holder used when neither the config file nor the CLI names one.
pub const DEFAULT_HOLDER: &str = "xDJs LLC";

/// A family of source files sharing one header template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
  /// JavaScript and TypeScript sources (`/** ... */`)
  Script,
  /// Stylesheets (`/* ... */`)
  Style,
  /// HTML documents (`<!-- ... -->`)
  Markup,
  /// SQL scripts (`-- ...`)
  Query,
  /// Python modules (`""" ... """`)
  Dynamic,
  /// Shell scripts (`# ...`, shebang-aware)
  Shell,
}

impl FileCategory {
  /// Every category, in declaration order.
  pub const ALL: [FileCategory; 6] = [
    FileCategory::Script,
    FileCategory::Style,
    FileCategory::Markup,
    FileCategory::Query,
    FileCategory::Dynamic,
    FileCategory::Shell,
  ];

  /// Short stable key for the category.
  pub const fn key(self) -> &'static str {
    match self {
      FileCategory::Script => "js",
      FileCategory::Style => "css",
      FileCategory::Markup => "html",
      FileCategory::Query => "sql",
      FileCategory::Dynamic => "py",
      FileCategory::Shell => "sh",
    }
  }

  /// How this category's header is combined with existing file content.
  pub const fn strategy(self) -> InjectionStrategy {
    match self {
      FileCategory::Shell => InjectionStrategy::ShebangAware,
      _ => InjectionStrategy::Prepend,
    }
  }
}

impl fmt::Display for FileCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}

/// The way a header is spliced into a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionStrategy {
  /// Header goes in front of the original content, untouched.
  Prepend,
  /// An existing `#!` line stays first; the header's own interpreter line is
  /// dropped in that case.
  ShebangAware,
}

/// Data used to fill out the header templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseData {
  /// The copyright holder named in the header
  pub holder: String,
  /// The copyright year to use in the header
  pub year: String,
}

impl LicenseData {
  pub fn new(holder: impl Into<String>, year: impl Into<String>) -> Self {
    Self {
      holder: holder.into(),
      year: year.into(),
    }
  }
}

/// Raw header templates keyed by category.
///
/// `{{year}}` and `{{holder}}` are substituted when the [`HeaderRegistry`] is
/// built. Every template ends in a blank line.
static TEMPLATES: LazyLock<HashMap<FileCategory, &'static str>> = LazyLock::new(|| {
  HashMap::from([
    (
      FileCategory::Script,
      "/**
 * Copyright (c) {{year}} {{holder}}
 * Licensed under the MIT License.
 * See LICENSE file in the project root for full license information.
 */

",
    ),
    (
      FileCategory::Style,
      "/*
 * Copyright (c) {{year}} {{holder}}
 * Licensed under the MIT License.
 * See LICENSE file in the project root for full license information.
 */

",
    ),
    (
      FileCategory::Markup,
      "<!--
Copyright (c) {{year}} {{holder}}
Licensed under the MIT License.
See LICENSE file in the project root for full license information.
-->

",
    ),
    (
      FileCategory::Query,
      "--
-- Copyright (c) {{year}} {{holder}}
-- Licensed under the MIT License.
-- See LICENSE file in the project root for full license information.
--

",
    ),
    (
      FileCategory::Dynamic,
      "\"\"\"
Copyright (c) {{year}} {{holder}}
Licensed under the MIT License.
See LICENSE file in the project root for full license information.
\"\"\"

",
    ),
    (
      FileCategory::Shell,
      "#!/bin/bash
#
# Copyright (c) {{year}} {{holder}}
# Licensed under the MIT License.
# See LICENSE file in the project root for full license information.
#

",
    ),
  ])
});

/// Error type for registry lookups.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
  /// A category has no header template registered.
  #[error("No header template registered for category '{0}'")]
  MissingTemplate(FileCategory),
}

/// Rendered headers for every [`FileCategory`].
///
/// Built once at startup from [`LicenseData`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct HeaderRegistry {
  headers: HashMap<FileCategory, String>,
  holder: String,
}

impl HeaderRegistry {
  /// Renders every template with the given license data.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::MissingTemplate`] if any category lacks a
  /// template. This guards the invariant that every category the classifier
  /// can produce has a header.
  pub fn new(data: &LicenseData) -> Result<Self, RegistryError> {
    let mut headers = HashMap::with_capacity(FileCategory::ALL.len());

    for category in FileCategory::ALL {
      let template = TEMPLATES
        .get(&category)
        .ok_or(RegistryError::MissingTemplate(category))?;
      headers.insert(category, render(template, data));
    }

    verbose_log!(
      "Rendered {} header templates for holder '{}' ({})",
      headers.len(),
      data.holder,
      data.year
    );

    Ok(Self {
      headers,
      holder: data.holder.clone(),
    })
  }

  /// The copyright holder named in every header.
  pub fn holder(&self) -> &str {
    &self.holder
  }

  /// Returns the rendered header for a category.
  pub fn header_for(&self, category: FileCategory) -> Result<&str, RegistryError> {
    self
      .headers
      .get(&category)
      .map(String::as_str)
      .ok_or(RegistryError::MissingTemplate(category))
  }

  /// Checks that every category in `categories` has a header.
  pub fn ensure_covers(&self, categories: impl IntoIterator<Item = FileCategory>) -> Result<(), RegistryError> {
    for category in categories {
      self.header_for(category)?;
    }
    Ok(())
  }
}

fn render(template: &str, data: &LicenseData) -> String {
  template.replace("{{year}}", &data.year).replace("{{holder}}", &data.holder)
}
