//! # headerstamp
//!
//! A tool that stamps MIT license headers onto the source files of a project
//! tree.
//!
//! `headerstamp` walks a directory, decides which files are eligible, and
//! prepends a header in the right comment syntax to every file that does not
//! already carry one. Running it twice changes nothing the second time.
//!
//! ## Features
//!
//! * Headers for JavaScript/TypeScript, CSS, HTML, SQL, Python and shell files
//! * Shebang lines stay on the first line of shell scripts
//! * Dependency, build and VCS directories are never touched
//! * Dry-run mode with optional diffs
//! * JSON and CSV reports
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerstamp::processor::{Processor, ProcessorConfig};
//! use headerstamp::templates::{HeaderRegistry, LicenseData};
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = HeaderRegistry::new(&LicenseData::new("Acme Corp", "2025"))?;
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         dry_run: true,
//!         ..ProcessorConfig::new(registry)
//!     })?;
//!
//!     let summary = processor.run(Path::new("src"))?;
//!     println!("{} of {} files need a header", summary.modified, summary.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`processor`] - Walking a tree and stamping files
//! * [`classifier`] - Deciding which files are eligible
//! * [`templates`] - Header templates per file category
//! * [`license_detection`] - Detecting existing license headers
//! * [`logging`] - Output modes and logging macros

pub mod classifier;
pub mod cli;
pub mod config;
pub mod diff;
pub mod interrupt;
pub mod license_detection;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod templates;
