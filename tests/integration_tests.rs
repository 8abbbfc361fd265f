//! # End-to-end tests
//!
//! These tests run the headerstamp binary against small sandbox trees.

mod common;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{JS_HEADER, SH_HEADER_BODY, headerstamp, read_file, snapshot_tree, write_file};
use headerstamp::classifier::{DEFAULT_SKIP_DIRS, DEFAULT_SKIP_FILES};
use predicates::prelude::*;
use tempfile::tempdir;

const LICENSED_PY: &str = "\"\"\"\nCopyright (c) 2024 xDJs LLC\nMIT License\n\"\"\"\nimport os\n";

#[test]
fn test_mixed_tree_is_stamped() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.js", "export const x = 1;\n")?;
  write_file(root, "b.py", LICENSED_PY)?;
  write_file(root, "c.sh", "#!/bin/bash\necho hi\n")?;

  headerstamp()?
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("Scanning directory:"))
    .stdout(predicate::str::contains("Found 3 source files"))
    .stdout(predicate::str::contains("\u{2713} a.js"))
    .stdout(predicate::str::contains("\u{2713} c.sh"))
    .stdout(predicate::str::contains("\u{2713} b.py").not())
    .stdout(predicate::str::contains("=== SUMMARY ==="))
    .stdout(predicate::str::contains("Files processed: 3"))
    .stdout(predicate::str::contains("Modified: 2"))
    .stdout(predicate::str::contains("Skipped: 1"))
    .stdout(predicate::str::contains("Errors: 0"));

  assert_eq!(read_file(root, "a.js")?, format!("{JS_HEADER}export const x = 1;\n"));
  assert_eq!(read_file(root, "b.py")?, LICENSED_PY);
  assert_eq!(
    read_file(root, "c.sh")?,
    format!("#!/bin/bash\n{SH_HEADER_BODY}echo hi\n")
  );

  Ok(())
}

#[test]
fn test_only_excluded_files() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "node_modules/x.js", "module.exports = {};\n")?;

  headerstamp()?
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("No source files found."))
    .stdout(predicate::str::contains("Modified: 0"))
    .stdout(predicate::str::contains("Skipped: 1"));

  assert_eq!(read_file(root, "node_modules/x.js")?, "module.exports = {};\n");

  Ok(())
}

#[test]
fn test_dry_run_does_not_modify() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "src/a.ts", "export {};\n")?;
  write_file(root, "src/style.css", "body {}\n")?;
  write_file(root, "run.sh", "#!/bin/sh\necho hi\n")?;
  let before = snapshot_tree(root)?;

  headerstamp()?
    .arg("--dry-run")
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("=== DRY RUN MODE ==="))
    .stdout(predicate::str::contains("Modified: 3"))
    .stdout(predicate::str::contains("Run without --dry-run to apply changes."));

  assert_eq!(snapshot_tree(root)?, before);

  Ok(())
}

#[test]
fn test_dry_run_show_diff() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "q.sql", "select 1;\n")?;

  headerstamp()?
    .args(["--dry-run", "--show-diff"])
    .arg(root)
    .assert()
    .success()
    .stderr(predicate::str::contains("+-- Copyright (c) 2025 xDJs LLC"))
    .stderr(predicate::str::contains(" select 1;"));

  assert_eq!(read_file(root, "q.sql")?, "select 1;\n");

  Ok(())
}

#[test]
fn test_second_run_changes_nothing() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "index.html", "<p>hi</p>\n")?;
  write_file(root, "app/main.py", "print('hi')\n")?;
  write_file(root, "app/query.sql", "select 1;\n")?;
  write_file(root, "bin/deploy.sh", "#!/usr/bin/env bash\nset -e\n")?;
  write_file(root, "web/page.jsx", "export default () => null;\n")?;

  headerstamp()?.arg(root).assert().success().stdout(predicate::str::contains("Modified: 5"));
  let after_first = snapshot_tree(root)?;

  headerstamp()?
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("Modified: 0"))
    .stdout(predicate::str::contains("Skipped: 5"));

  assert_eq!(snapshot_tree(root)?, after_first);

  Ok(())
}

#[test]
fn test_builtin_exclusions_are_never_touched() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();

  for dir in DEFAULT_SKIP_DIRS {
    write_file(root, &format!("{dir}/x.js"), "let x;\n")?;
    write_file(root, &format!("src/{dir}/deep/y.py"), "y = 1\n")?;
  }
  for file in DEFAULT_SKIP_FILES {
    write_file(root, &format!("nested/{file}"), "let x;\n")?;
  }
  let before = snapshot_tree(root)?;

  headerstamp()?
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("No source files found."))
    .stdout(predicate::str::contains("Modified: 0"));

  assert_eq!(snapshot_tree(root)?, before);

  Ok(())
}

#[test]
fn test_late_copyright_gets_second_header() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  let mut content = "// filler\n".repeat(25);
  content.push_str("// Copyright (c) 2025 xDJs LLC\n");
  write_file(root, "late.js", &content)?;

  headerstamp()?.arg(root).assert().success().stdout(predicate::str::contains("Modified: 1"));

  let stamped = read_file(root, "late.js")?;
  assert!(stamped.starts_with(JS_HEADER));
  assert_eq!(stamped.matches("Copyright (c) 2025 xDJs LLC").count(), 2);

  Ok(())
}

#[test]
fn test_missing_directory_fails() -> Result<()> {
  let temp_dir = tempdir()?;

  headerstamp()?
    .arg(temp_dir.path().join("does-not-exist"))
    .assert()
    .code(1)
    .stderr(predicate::str::contains("does not exist"));

  Ok(())
}

#[test]
fn test_directory_flag() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.js", "let a;\n")?;

  headerstamp()?
    .arg("-d")
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("Modified: 1"));

  assert!(read_file(root, "a.js")?.starts_with(JS_HEADER));

  Ok(())
}

#[test]
fn test_test_files_need_flag() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "src/a.test.ts", "test('x', () => {});\n")?;
  write_file(root, "src/b.spec.js", "it('y', () => {});\n")?;

  headerstamp()?
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("Modified: 0"))
    .stdout(predicate::str::contains("Skipped: 2"));

  headerstamp()?
    .arg("--include-tests")
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("Modified: 2"));

  assert!(read_file(root, "src/a.test.ts")?.starts_with(JS_HEADER));

  Ok(())
}

#[test]
fn test_custom_holder() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "main.py", "print('hi')\n")?;

  headerstamp()?.args(["--holder", "Acme Corp"]).arg(root).assert().success();

  let stamped = read_file(root, "main.py")?;
  assert!(stamped.starts_with("\"\"\"\nCopyright (c) 2025 Acme Corp\n"));

  headerstamp()?
    .args(["--holder", "Acme Corp"])
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("Modified: 0"));

  Ok(())
}

#[test]
fn test_binary_file_is_skipped() -> Result<()> {
  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  let bytes = [0xFF, 0xFE, 0x00, 0x61];
  std::fs::write(root.join("blob.js"), bytes)?;

  headerstamp()?
    .arg(root)
    .assert()
    .success()
    .stdout(predicate::str::contains("Modified: 0"))
    .stdout(predicate::str::contains("Skipped: 1"));

  assert_eq!(std::fs::read(root.join("blob.js"))?, bytes);

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_executable_bit_survives() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "run.sh", "#!/bin/sh\necho hi\n")?;
  std::fs::set_permissions(root.join("run.sh"), std::fs::Permissions::from_mode(0o755))?;

  headerstamp()?.arg(root).assert().success();

  let mode = std::fs::metadata(root.join("run.sh"))?.permissions().mode();
  assert_eq!(mode & 0o777, 0o755);
  assert!(read_file(root, "run.sh")?.starts_with("#!/bin/sh\n#\n# Copyright"));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_unwritable_file_is_an_error_and_others_are_stamped() -> Result<()> {
  use std::os::unix::fs::PermissionsExt;

  let temp_dir = tempdir()?;
  let root = temp_dir.path();
  write_file(root, "a.js", "let a;\n")?;
  write_file(root, "ro.js", "let ro;\n")?;
  std::fs::set_permissions(root.join("ro.js"), std::fs::Permissions::from_mode(0o444))?;

  // Running as root can write read-only files
  if std::fs::OpenOptions::new().write(true).open(root.join("ro.js")).is_ok() {
    return Ok(());
  }

  headerstamp()?
    .arg(root)
    .assert()
    .code(1)
    .stdout(predicate::str::contains("\u{2713} a.js"))
    .stdout(predicate::str::contains("\u{2717} Error processing ro.js"))
    .stdout(predicate::str::contains("Modified: 1"))
    .stdout(predicate::str::contains("Errors: 1"));

  assert!(read_file(root, "a.js")?.starts_with(JS_HEADER));
  assert_eq!(read_file(root, "ro.js")?, "let ro;\n");
  let mode = std::fs::metadata(root.join("ro.js"))?.permissions().mode();
  assert_eq!(mode & 0o777, 0o444);

  Ok(())
}

#[test]
fn test_completions() -> Result<()> {
  headerstamp()?
    .args(["--completions", "bash"])
    .assert()
    .success()
    .stdout(predicate::str::contains("headerstamp"));

  Ok(())
}
