//! lintscope core library.
//!
//! This crate exposes programmatic APIs for two CI steps around a
//! documentation linter: narrowing the list of files to lint by include
//! paths, and reporting linter findings that fall on modified lines.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `paths`: Include-path filtering of the file list.
//! - `findings`: Linter JSON ingest.
//! - `ranges`: Modified line ranges from the diff step.
//! - `filter`: Line filtering and severity classification.
//! - `render`: Annotations, markdown report, counts file.
//! - `report`: The reporter pipeline end to end.
//! - `models`: Issue, severity, and count types.
//! - `output`: Human/JSON printers.
//! - `workflow`: CI runner command protocol.
//! - `logging`: Diagnostics as runner markers.
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod findings;
pub mod logging;
pub mod models;
pub mod output;
pub mod paths;
pub mod ranges;
pub mod render;
pub mod report;
pub mod workflow;

pub use error::{Error, Result};
