//! Issue reporter pipeline: ingest, load ranges, filter, render, write.

use crate::error::{write_artifact, Result};
use crate::filter::{filter_issues, FilterStats};
use crate::findings::Findings;
use crate::models::{Counts, FilteredIssues};
use crate::ranges::ModifiedRanges;
use crate::render::{self, PrContext, ReportOptions};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub findings: PathBuf,
    pub ranges: PathBuf,
    pub report: PathBuf,
    pub counts: PathBuf,
    pub title: String,
    pub footer: Option<String>,
    pub context: Option<PrContext>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    /// False when the linter output was missing, malformed or empty.
    pub had_findings: bool,
    pub issues: FilteredIssues,
    pub counts: Counts,
    pub annotations: Vec<String>,
    pub stats: Option<FilterStats>,
    #[serde(skip)]
    pub markdown: String,
    pub report: PathBuf,
    pub counts_file: PathBuf,
}

/// Ingest findings and ranges, filter, and render everything in memory.
///
/// Input problems degrade to an empty result. Nothing is written here, so
/// annotations can be emitted before the artifacts land on disk.
pub fn build_report(settings: &ReportSettings) -> ReportOutcome {
    match &settings.context {
        Some(ctx) => debug!("Repository: {}, PR: {}", ctx.repository, ctx.pr_number),
        None => debug!("No pull request context; line links disabled"),
    }

    let findings = Findings::load(&settings.findings);
    let (issues, stats) = if findings.is_empty() {
        (FilteredIssues::default(), None)
    } else {
        let ranges = ModifiedRanges::load(&settings.ranges);
        let (issues, stats) = filter_issues(&findings, &ranges);
        (issues, Some(stats))
    };

    let opts = ReportOptions {
        title: &settings.title,
        footer: settings.footer.as_deref(),
        context: settings.context.as_ref(),
    };
    let markdown = render::render_markdown(&issues, &opts);
    let counts = issues.counts();
    let annotations = render::render_annotations(&issues);

    ReportOutcome {
        had_findings: !findings.is_empty(),
        issues,
        counts,
        annotations,
        stats,
        markdown,
        report: settings.report.clone(),
        counts_file: settings.counts.clone(),
    }
}

/// Write the markdown report and the counts file. Any failure is fatal.
pub fn write_report(res: &ReportOutcome) -> Result<()> {
    write_artifact("report", &res.report, &res.markdown)?;
    write_artifact("issue counts", &res.counts_file, &render::render_counts(&res.counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn run_report(s: &ReportSettings) -> Result<ReportOutcome> {
        let res = build_report(s);
        write_report(&res)?;
        Ok(res)
    }

    fn settings(root: &Path) -> ReportSettings {
        ReportSettings {
            findings: root.join("vale_output.json"),
            ranges: root.join("line_ranges.txt"),
            report: root.join("vale_report.md"),
            counts: root.join("issue_counts.txt"),
            title: render::DEFAULT_TITLE.to_string(),
            footer: None,
            context: None,
        }
    }

    #[test]
    fn test_single_error_on_modified_line() {
        let dir = tempdir().unwrap();
        let s = settings(dir.path());
        fs::write(
            &s.findings,
            r#"{"a.md":[{"Line":5,"Severity":"error","Check":"Spacing","Message":"bad space"}]}"#,
        )
        .unwrap();
        fs::write(&s.ranges, "a.md|1|10\n").unwrap();

        let out = run_report(&s).unwrap();
        assert!(out.had_findings);
        assert_eq!(out.annotations, vec!["::error file=a.md,line=5::Spacing: bad space"]);
        let md = fs::read_to_string(&s.report).unwrap();
        assert!(md.contains("**Summary:** 1 error found"));
        assert_eq!(
            fs::read_to_string(&s.counts).unwrap(),
            "errors=1\nwarnings=0\nsuggestions=0\n"
        );
    }

    #[test]
    fn test_missing_findings_writes_no_issue_report() {
        let dir = tempdir().unwrap();
        let s = settings(dir.path());
        let out = run_report(&s).unwrap();
        assert!(!out.had_findings);
        assert!(out.stats.is_none());
        assert!(out.annotations.is_empty());
        assert_eq!(
            fs::read_to_string(&s.report).unwrap(),
            "## ✅ Vale Linting Results\n\n**No issues found on modified lines!**\n"
        );
        assert_eq!(
            fs::read_to_string(&s.counts).unwrap(),
            "errors=0\nwarnings=0\nsuggestions=0\n"
        );
    }

    #[test]
    fn test_all_issues_outside_ranges_writes_no_issue_report() {
        let dir = tempdir().unwrap();
        let s = settings(dir.path());
        fs::write(
            &s.findings,
            r#"{"a.md":[{"Line":50,"Severity":"warning","Check":"R","Message":"m"}]}"#,
        )
        .unwrap();
        fs::write(&s.ranges, "a.md|1|3\n").unwrap();
        let out = run_report(&s).unwrap();
        assert!(out.had_findings);
        assert_eq!(out.counts.total(), 0);
        assert!(out.stats.unwrap().all_filtered());
        assert!(fs::read_to_string(&s.report)
            .unwrap()
            .contains("No issues found on modified lines!"));
    }

    #[test]
    fn test_malformed_alert_keeps_remaining_findings() {
        let dir = tempdir().unwrap();
        let s = settings(dir.path());
        fs::write(
            &s.findings,
            r#"{"a.md":[{"Line":5,"Severity":"error","Check":"Spacing","Message":"bad space"},{"Line":null}]}"#,
        )
        .unwrap();
        let out = run_report(&s).unwrap();
        assert_eq!(out.counts.errors, 1);
        assert_eq!(
            fs::read_to_string(&s.counts).unwrap(),
            "errors=1\nwarnings=0\nsuggestions=0\n"
        );
    }

    #[test]
    fn test_build_report_writes_nothing() {
        let dir = tempdir().unwrap();
        let s = settings(dir.path());
        fs::write(
            &s.findings,
            r#"{"a.md":[{"Line":5,"Severity":"error","Check":"Spacing","Message":"bad space"}]}"#,
        )
        .unwrap();
        let out = build_report(&s);
        assert_eq!(out.annotations.len(), 1);
        assert!(out.markdown.contains("**Summary:** 1 error found"));
        assert!(!s.report.exists());
        assert!(!s.counts.exists());
    }

    #[test]
    fn test_unwritable_report_is_fatal() {
        let dir = tempdir().unwrap();
        let mut s = settings(dir.path());
        s.report = dir.path().join("no-such-dir").join("vale_report.md");
        let err = run_report(&s).unwrap_err();
        assert!(matches!(err, Error::Write { what: "report", .. }));
    }
}
