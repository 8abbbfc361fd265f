#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use walkdir::WalkDir;

/// Year passed to every CLI run so expected headers are stable.
pub const TEST_YEAR: &str = "2025";

/// The script header as rendered for the default holder and [`TEST_YEAR`].
pub const JS_HEADER: &str = "/**
 * Copyright (c) 2025 xDJs LLC
 * Licensed under the MIT License.
 * See LICENSE file in the project root for full license information.
 */

";

/// The shell header body that follows a script's own shebang.
pub const SH_HEADER_BODY: &str = "#
# Copyright (c) 2025 xDJs LLC
# Licensed under the MIT License.
# See LICENSE file in the project root for full license information.
#

";

/// Builds a command for the binary, isolated from the caller's environment.
pub fn headerstamp() -> Result<Command> {
  let mut cmd = Command::cargo_bin("headerstamp").context("Failed to locate headerstamp binary")?;
  cmd
    .arg("--year")
    .arg(TEST_YEAR)
    .env_remove("RUST_LOG")
    .env_remove("HEADERSTAMP_CONFIG")
    .env_remove("FORCE_COLOR")
    .env_remove("CLICOLOR_FORCE");
  Ok(cmd)
}

/// Writes `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  let path = root.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Every regular file under `root` with its bytes, keyed by relative path.
pub fn snapshot_tree(root: &Path) -> Result<BTreeMap<String, Vec<u8>>> {
  let mut files = BTreeMap::new();
  for entry in WalkDir::new(root).min_depth(1) {
    let entry = entry?;
    if entry.file_type().is_file() {
      let relative = entry.path().strip_prefix(root)?.to_string_lossy().replace('\\', "/");
      files.insert(relative, fs::read(entry.path())?);
    }
  }
  Ok(files)
}
