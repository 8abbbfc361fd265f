//! # Configuration Module
//!
//! This module provides configuration support for headerstamp, allowing users
//! to set the copyright holder and year and to exclude more directories and
//! files than the built-in lists.
//!
//! Configuration can be specified in a `.headerstamp.toml` file in the scan
//! root, or via the `HEADERSTAMP_CONFIG` environment variable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".headerstamp.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "HEADERSTAMP_CONFIG";

/// License data overrides.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
  /// Copyright holder named in every header.
  pub holder: Option<String>,

  /// Copyright year. Kept as a string so ranges like "2019-2025" work.
  pub year: Option<String>,
}

/// Additional exclusions.
///
/// These are added to the built-in lists; they can never remove an entry.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
  /// Directory names; any file with an ancestor of this name is skipped.
  #[serde(default)]
  pub directories: Vec<String>,

  /// Exact file names to skip.
  #[serde(default)]
  pub files: Vec<String>,
}

/// Main configuration struct for headerstamp.
///
/// This struct is loaded from a `.headerstamp.toml` file.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Process `.test.` and `.spec.` files too.
  #[serde(default, rename = "include-tests")]
  pub include_tests: bool,

  #[serde(default)]
  pub license: LicenseConfig,

  #[serde(default)]
  pub exclude: ExcludeConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// An exclusion entry is not a bare name.
  #[error("Invalid exclusion '{name}': {message}")]
  InvalidExclusion { name: String, message: String },

  /// A license field is present but unusable.
  #[error("Invalid license field '{field}': {message}")]
  InvalidLicense { field: &'static str, message: String },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;
    let config = config.normalize();

    verbose_log!(
      "Loaded {} extra excluded directories and {} extra excluded files",
      config.exclude.directories.len(),
      config.exclude.files.len()
    );

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - Exclusion entries are non-empty bare names (no path separators)
  /// - `holder` and `year`, when present, are not blank
  fn validate(&self) -> Result<(), ConfigError> {
    for name in self.exclude.directories.iter().chain(&self.exclude.files) {
      if name.trim().is_empty() {
        return Err(ConfigError::InvalidExclusion {
          name: name.clone(),
          message: "name cannot be empty".to_string(),
        });
      }

      if name.contains('/') || name.contains('\\') {
        return Err(ConfigError::InvalidExclusion {
          name: name.clone(),
          message: "must be a bare name, not a path".to_string(),
        });
      }
    }

    if let Some(holder) = &self.license.holder
      && holder.trim().is_empty()
    {
      return Err(ConfigError::InvalidLicense {
        field: "holder",
        message: "cannot be empty".to_string(),
      });
    }

    if let Some(year) = &self.license.year
      && year.trim().is_empty()
    {
      return Err(ConfigError::InvalidLicense {
        field: "year",
        message: "cannot be empty".to_string(),
      });
    }

    Ok(())
  }

  /// Trim surrounding whitespace from every user-supplied value.
  fn normalize(self) -> Self {
    let trim = |values: Vec<String>| -> Vec<String> { values.into_iter().map(|v| v.trim().to_string()).collect() };

    Self {
      include_tests: self.include_tests,
      license: LicenseConfig {
        holder: self.license.holder.map(|h| h.trim().to_string()),
        year: self.license.year.map(|y| y.trim().to_string()),
      },
      exclude: ExcludeConfig {
        directories: trim(self.exclude.directories),
        files: trim(self.exclude.files),
      },
    }
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `HEADERSTAMP_CONFIG` environment variable
/// 3. `.headerstamp.toml` in the scan root
///
/// An explicit path is returned even if it does not exist, so that loading
/// it reports the problem.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `root` - The directory being scanned
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let root_config = root.join(DEFAULT_CONFIG_FILENAME);
  if root_config.is_file() {
    verbose_log!("Using config: {}", root_config.display());
    return Some(root_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `root` - The directory being scanned
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if discovery is disabled or no config
/// file is found.
pub fn load_config(explicit_path: Option<&Path>, root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, root) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
