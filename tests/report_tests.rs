//! # Report generation tests
//!
//! This module tests the JSON and CSV report files written after a run.

mod common;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{headerstamp, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

fn sandbox(root: &std::path::Path) -> Result<()> {
  write_file(root, "a.js", "let a;\n")?;
  write_file(root, "b.py", "\"\"\"\nMIT License\n\"\"\"\n")?;
  write_file(root, "dist/bundle.js", "let b;\n")?;
  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let temp_dir = tempdir()?;
  let out_dir = tempdir()?;
  sandbox(temp_dir.path())?;
  let report_path = out_dir.path().join("report.json");

  headerstamp()?
    .arg("--report-json")
    .arg(&report_path)
    .arg(temp_dir.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("Generated JSON report at"));

  let report: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&report_path)?)?;
  assert_eq!(report["dry_run"], false);
  assert_eq!(report["interrupted"], false);
  assert_eq!(report["summary"]["processed"], 3);
  assert_eq!(report["summary"]["modified"], 1);
  assert_eq!(report["summary"]["skipped"], 2);
  assert_eq!(report["summary"]["errors"], 0);

  let files = report["files"].as_array().expect("files should be an array");
  assert_eq!(files.len(), 3);
  assert_eq!(files[0]["path"], "a.js");
  assert_eq!(files[0]["outcome"], "added");
  assert_eq!(files[0]["category"], "script");
  assert_eq!(files[1]["outcome"], "already_licensed");
  assert_eq!(files[2]["outcome"], "ineligible");
  assert_eq!(files[2]["skip_reason"]["kind"], "excluded_directory");
  assert_eq!(files[2]["skip_reason"]["name"], "dist");

  Ok(())
}

#[test]
fn test_csv_report_in_dry_run() -> Result<()> {
  let temp_dir = tempdir()?;
  let out_dir = tempdir()?;
  sandbox(temp_dir.path())?;
  let report_path = out_dir.path().join("report.csv");

  headerstamp()?
    .arg("--dry-run")
    .arg("--report-csv")
    .arg(&report_path)
    .arg(temp_dir.path())
    .assert()
    .success();

  let csv = std::fs::read_to_string(&report_path)?;
  let mut lines = csv.lines();
  assert_eq!(lines.next(), Some("file_path,category,outcome,message"));
  assert_eq!(lines.next(), Some("a.js,js,would_add,Would add license to: a.js"));
  assert!(csv.contains("Modified,1\n"));
  assert!(csv.contains("Skipped,2\n"));

  Ok(())
}
