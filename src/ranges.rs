//! Modified line ranges produced by the diff step.
//!
//! Each record is `path|start_line|line_count`. A record covers the
//! inclusive interval `[start, start + max(count, 1)]`, so `a.md|1|10`
//! covers lines 1 through 11. Paths are normalized before they are used as
//! keys (see [`normalize_path`]).

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inclusive line interval.
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Build the range for a `start|count` record. A zero count still marks
    /// one line.
    pub fn from_start_count(start: u32, count: u32) -> Self {
        LineRange {
            start,
            end: start.saturating_add(count.max(1)),
        }
    }

    pub fn contains(&self, line: u32) -> bool {
        self.start <= line && line <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeLineError {
    #[error("expected 'path|start|count', got '{0}'")]
    Shape(String),
    #[error("invalid {field} '{value}'")]
    Number { field: &'static str, value: String },
}

/// Normalize a path for matching: forward slashes, no leading `./`.
pub fn normalize_path(path: &str) -> String {
    let mut s = path.trim().replace('\\', "/");
    while let Some(rest) = s.strip_prefix("./") {
        s = rest.to_string();
    }
    s
}

/// Parse one record. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<(String, LineRange)>, RangeLineError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    // Split from the right so a path containing '|' survives.
    let mut parts = line.rsplitn(3, '|');
    let (count, start, path) = match (parts.next(), parts.next(), parts.next()) {
        (Some(c), Some(s), Some(p)) if !p.trim().is_empty() => (c.trim(), s.trim(), p),
        _ => return Err(RangeLineError::Shape(line.to_string())),
    };
    let start: u32 = start.parse().map_err(|_| RangeLineError::Number {
        field: "start line",
        value: start.to_string(),
    })?;
    let count: u32 = if count.is_empty() {
        1
    } else {
        count.parse().map_err(|_| RangeLineError::Number {
            field: "line count",
            value: count.to_string(),
        })?
    };
    Ok(Some((
        normalize_path(path),
        LineRange::from_start_count(start, count),
    )))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Modified ranges keyed by normalized path.
///
/// An empty map means no range data was available, in which case line
/// filtering is skipped entirely. A file missing from a non-empty map has no
/// tracked changes.
pub struct ModifiedRanges {
    by_file: HashMap<String, Vec<LineRange>>,
}

impl ModifiedRanges {
    /// Parse a whole ranges document, skipping malformed lines.
    pub fn parse(text: &str) -> Self {
        let mut ranges = ModifiedRanges::default();
        for (idx, line) in text.lines().enumerate() {
            match parse_line(line) {
                Ok(Some((file, range))) => {
                    debug!("Modified range: {} lines {}", file, range);
                    ranges.insert(file, range);
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping modified range line {}: {}", idx + 1, e),
            }
        }
        ranges
    }

    /// Load ranges from `path`. A missing file disables line filtering.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Modified ranges file not found: {}; line filtering disabled",
                    path.display()
                );
                return ModifiedRanges::default();
            }
            Err(e) => {
                warn!("Failed to load modified line ranges: {}", e);
                return ModifiedRanges::default();
            }
        };
        let ranges = ModifiedRanges::parse(&text);
        debug!("Total files with modified ranges: {}", ranges.file_count());
        ranges
    }

    pub fn insert(&mut self, file: String, range: LineRange) {
        self.by_file.entry(file).or_default().push(range);
    }

    /// Ranges for a normalized path, if the file has tracked changes.
    pub fn get(&self, normalized: &str) -> Option<&[LineRange]> {
        self.by_file.get(normalized).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.by_file.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("./docs/a.md"), "docs/a.md");
        assert_eq!(normalize_path("././a.md"), "a.md");
        assert_eq!(normalize_path("docs\\win\\a.md"), "docs/win/a.md");
        assert_eq!(normalize_path(".github/a.md"), ".github/a.md");
    }

    #[test]
    fn test_range_is_inclusive_and_count_zero_is_one_line() {
        let r = LineRange::from_start_count(1, 10);
        assert!(r.contains(1));
        assert!(r.contains(11));
        assert!(!r.contains(12));
        assert!(!r.contains(0));
        let z = LineRange::from_start_count(7, 0);
        assert_eq!(z, LineRange { start: 7, end: 8 });
    }

    #[test]
    fn test_parse_line_variants() {
        assert_eq!(parse_line("   "), Ok(None));
        let (p, r) = parse_line("./a.md|3|2").unwrap().unwrap();
        assert_eq!(p, "a.md");
        assert_eq!(r, LineRange { start: 3, end: 5 });
        let (p, r) = parse_line("we|ird.md|4|").unwrap().unwrap();
        assert_eq!(p, "we|ird.md");
        assert_eq!(r, LineRange { start: 4, end: 5 });
        assert!(matches!(parse_line("a.md|3"), Err(RangeLineError::Shape(_))));
        assert!(matches!(
            parse_line("a.md|x|2"),
            Err(RangeLineError::Number { field: "start line", .. })
        ));
        assert!(matches!(
            parse_line("a.md|1|-2"),
            Err(RangeLineError::Number { field: "line count", .. })
        ));
    }

    #[test]
    fn test_parse_skips_bad_lines_and_groups_per_file() {
        let ranges = ModifiedRanges::parse("a.md|1|2\ngarbage\n\nb.md|10|1\na.md|20|5\n");
        assert_eq!(ranges.file_count(), 2);
        assert_eq!(
            ranges.get("a.md").unwrap(),
            &[
                LineRange { start: 1, end: 3 },
                LineRange { start: 20, end: 25 }
            ]
        );
        assert!(ranges.get("c.md").is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let ranges = ModifiedRanges::load(&dir.path().join("line_ranges.txt"));
        assert!(ranges.is_empty());
    }
}
