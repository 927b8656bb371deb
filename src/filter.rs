//! Restrict findings to modified lines and bucket them by severity.

use crate::findings::Findings;
use crate::models::{FilteredIssues, Issue, Severity};
use crate::ranges::{normalize_path, ModifiedRanges};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Bookkeeping for one filtering pass.
pub struct FilterStats {
    pub total: usize,
    pub kept: usize,
    pub no_file_match: usize,
    pub no_line_match: usize,
    pub unmatched_files: BTreeSet<String>,
}

impl FilterStats {
    /// Everything the linter found was dropped.
    pub fn all_filtered(&self) -> bool {
        self.total > 0 && self.kept == 0
    }
}

/// Keep issues on modified lines and classify them.
///
/// With no range data at all every issue is kept. Otherwise an issue is kept
/// only when its file has ranges and one of them covers its line.
pub fn filter_issues(
    findings: &Findings,
    ranges: &ModifiedRanges,
) -> (FilteredIssues, FilterStats) {
    let mut out = FilteredIssues::default();
    let mut stats = FilterStats::default();

    debug!("Linter found issues in {} file(s)", findings.files.len());
    debug!("Modified ranges available for {} file(s)", ranges.file_count());

    for (file, issues) in &findings.files {
        let normalized = normalize_path(file);
        debug!("Processing '{}' (normalized: '{}')", file, normalized);
        for raw in issues {
            stats.total += 1;
            let line = raw.line;
            if !ranges.is_empty() {
                match ranges.get(&normalized) {
                    Some(rs) => {
                        if !rs.iter().any(|r| r.contains(line)) {
                            stats.no_line_match += 1;
                            debug!("  Filtered: line {} not in modified ranges", line);
                            continue;
                        }
                    }
                    None => {
                        stats.no_file_match += 1;
                        stats.unmatched_files.insert(normalized.clone());
                        continue;
                    }
                }
            }
            stats.kept += 1;
            out.push(Issue {
                file: file.clone(),
                line,
                rule: raw.check.clone().unwrap_or_else(|| "Unknown".to_string()),
                message: raw.message.clone().unwrap_or_default(),
                severity: Severity::parse(raw.severity.as_deref()),
            });
        }
    }

    log_summary(&stats);
    (out, stats)
}

fn log_summary(stats: &FilterStats) {
    debug!("Filtering summary: {} total issue(s)", stats.total);
    debug!("  - Kept: {}", stats.kept);
    debug!("  - Filtered (file not in diff): {}", stats.no_file_match);
    debug!("  - Filtered (line not in range): {}", stats.no_line_match);
    if !stats.unmatched_files.is_empty() {
        let files: Vec<&str> = stats.unmatched_files.iter().map(String::as_str).collect();
        debug!("  - Unmatched files from linter: {}", files.join(", "));
    }
    if stats.all_filtered() {
        if stats.no_file_match > 0 {
            warn!("All lint issues were filtered out. Some files from the linter output didn't match git diff paths.");
        } else {
            info!(
                "Found {} lint issue(s) in the codebase, but none on modified lines.",
                stats.total
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::RawIssue;
    use crate::ranges::LineRange;

    fn raw(line: u32, severity: &str) -> RawIssue {
        RawIssue {
            line,
            severity: Some(severity.to_string()),
            check: Some("Vale.Rule".into()),
            message: Some("msg".into()),
        }
    }

    fn findings(files: Vec<(&str, Vec<RawIssue>)>) -> Findings {
        Findings {
            files: files.into_iter().map(|(f, v)| (f.to_string(), v)).collect(),
        }
    }

    fn ranges(entries: &[(&str, u32, u32)]) -> ModifiedRanges {
        let mut r = ModifiedRanges::default();
        for (f, start, end) in entries {
            r.insert(f.to_string(), LineRange { start: *start, end: *end });
        }
        r
    }

    #[test]
    fn test_no_ranges_keeps_everything() {
        let f = findings(vec![
            ("a.md", vec![raw(1, "error"), raw(900, "warning")]),
            ("b.md", vec![raw(0, "whatever")]),
        ]);
        let (out, stats) = filter_issues(&f, &ModifiedRanges::default());
        assert_eq!(out.iter().count(), 3);
        assert_eq!(stats.kept, 3);
        assert_eq!(out.suggestions.len(), 1);
    }

    #[test]
    fn test_range_boundaries_are_inclusive() {
        let f = findings(vec![(
            "x.md",
            vec![
                raw(9, "error"),
                raw(10, "error"),
                raw(15, "error"),
                raw(20, "error"),
                raw(21, "error"),
            ],
        )]);
        let (out, stats) = filter_issues(&f, &ranges(&[("x.md", 10, 20)]));
        let lines: Vec<u32> = out.errors.iter().map(|i| i.line).collect();
        assert_eq!(lines, vec![10, 15, 20]);
        assert_eq!(stats.no_line_match, 2);
    }

    #[test]
    fn test_file_without_ranges_is_dropped_when_others_have_ranges() {
        let f = findings(vec![
            ("x.md", vec![raw(12, "warning")]),
            ("./y.md", vec![raw(12, "warning")]),
        ]);
        let (out, stats) = filter_issues(&f, &ranges(&[("x.md", 10, 20)]));
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].file, "x.md");
        assert_eq!(stats.no_file_match, 1);
        assert!(stats.unmatched_files.contains("y.md"));
    }

    #[test]
    fn test_paths_are_normalized_but_display_is_original() {
        let f = findings(vec![("./docs/a.md", vec![raw(3, "ERROR")])]);
        let (out, _) = filter_issues(&f, &ranges(&[("docs/a.md", 1, 5)]));
        assert_eq!(out.errors.len(), 1);
        assert_eq!(out.errors[0].file, "./docs/a.md");
    }

    #[test]
    fn test_missing_fields_default() {
        let f = findings(vec![("a.md", vec![RawIssue::default()])]);
        let (out, _) = filter_issues(&f, &ModifiedRanges::default());
        let issue = &out.suggestions[0];
        assert_eq!(issue.line, 0);
        assert_eq!(issue.rule, "Unknown");
        assert_eq!(issue.message, "");
    }

    #[test]
    fn test_output_is_subset_and_all_filtered_flag() {
        let f = findings(vec![("a.md", vec![raw(50, "error"), raw(60, "warning")])]);
        let (out, stats) = filter_issues(&f, &ranges(&[("a.md", 1, 2)]));
        assert!(out.is_empty());
        assert!(stats.all_filtered());
        assert_eq!(stats.total, 2);
    }
}
