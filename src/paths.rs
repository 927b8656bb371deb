//! Include-path filtering of the list of files to lint.
//!
//! Patterns are shell globs (`*`, `?` within one path segment, `**` across
//! segments) or bare directory prefixes. A file is kept when any pattern
//! matches it.

use crate::error::{write_artifact, Error, Result};
use crate::workflow;
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Split the include-paths input on newlines and whitespace, trimming
/// trailing separators and dropping empty tokens.
pub fn parse_patterns(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .map(|tok| tok.trim_end_matches('/'))
        .filter(|tok| !tok.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compiled include patterns.
pub struct PathMatcher {
    patterns: Vec<(String, Option<Pattern>)>,
}

impl PathMatcher {
    pub fn new(patterns: &[String]) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| {
                let compiled = match Pattern::new(p) {
                    Ok(pat) => Some(pat),
                    Err(e) => {
                        warn!("Invalid glob pattern '{}': {}; using prefix match only", p, e);
                        None
                    }
                };
                (p.clone(), compiled)
            })
            .collect();
        PathMatcher { patterns }
    }

    /// Glob match, or directory-prefix match on `pattern + "/"`.
    pub fn matches(&self, file: &str) -> bool {
        self.patterns.iter().any(|(raw, compiled)| {
            if let Some(pat) = compiled {
                if pat.matches_with(file, MATCH_OPTIONS) {
                    return true;
                }
            }
            file.strip_prefix(raw.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Matching files in their original order.
    pub fn filter(&self, files: &[String]) -> Vec<String> {
        files
            .iter()
            .filter(|f| {
                let keep = self.matches(f);
                if keep {
                    debug!("File '{}' matched", f);
                } else {
                    debug!("File '{}' excluded", f);
                }
                keep
            })
            .cloned()
            .collect()
    }
}

/// Read the file list, one path per line. `None` when the list is absent.
pub fn read_file_list(path: &Path) -> Option<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(s) => Some(
            s.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            warn!("Failed to read file list {}: {}", path.display(), e);
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterSettings {
    pub patterns: Vec<String>,
    pub files: PathBuf,
    /// Step output sink (`GITHUB_OUTPUT`), if any.
    pub step_output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStatus {
    NoPatterns,
    NoFileList,
    Filtered,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome {
    pub status: FilterStatus,
    pub patterns: Vec<String>,
    pub files: PathBuf,
    pub total: usize,
    pub kept: Vec<String>,
}

impl FilterOutcome {
    pub fn has_files(&self) -> bool {
        !self.kept.is_empty()
    }
}

/// Filter the file list in place and publish `has_files`.
///
/// Missing patterns or a missing list are no-ops. An empty result removes
/// the list file instead of leaving an empty one behind.
pub fn run_filter(settings: &FilterSettings) -> Result<FilterOutcome> {
    let mut outcome = FilterOutcome {
        status: FilterStatus::NoPatterns,
        patterns: settings.patterns.clone(),
        files: settings.files.clone(),
        total: 0,
        kept: Vec::new(),
    };
    if settings.patterns.is_empty() {
        info!("No include-path patterns provided; file list left unchanged");
        return Ok(outcome);
    }
    debug!("Patterns: {}", settings.patterns.join(", "));

    let Some(files) = read_file_list(&settings.files) else {
        info!("No file list found at {}", settings.files.display());
        outcome.status = FilterStatus::NoFileList;
        return Ok(outcome);
    };

    let matcher = PathMatcher::new(&settings.patterns);
    outcome.status = FilterStatus::Filtered;
    outcome.total = files.len();
    outcome.kept = matcher.filter(&files);

    if outcome.has_files() {
        let mut body = outcome.kept.join("\n");
        body.push('\n');
        write_artifact("file list", &settings.files, &body)?;
    } else if settings.files.exists() {
        fs::remove_file(&settings.files).map_err(|source| Error::Remove {
            path: settings.files.clone(),
            source,
        })?;
    }

    if let Some(sink) = settings.step_output.as_ref() {
        let value = if outcome.has_files() { "true" } else { "false" };
        workflow::append_output(sink, "has_files", value).map_err(|source| {
            Error::StepOutput {
                name: "has_files".into(),
                path: sink.clone(),
                source,
            }
        })?;
    }
    Ok(outcome)
}
