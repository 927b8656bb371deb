//! Report rendering: inline annotations, the markdown summary, and the
//! counts file consumed by later workflow steps.

use crate::models::{Counts, FilteredIssues, Issue, Severity};
use crate::ranges::normalize_path;
use crate::workflow;
use sha2::{Digest, Sha256};

pub const DEFAULT_TITLE: &str = "Vale Linting Results";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Pull request coordinates used to link lines into the PR diff view.
pub struct PrContext {
    pub server_url: String,
    pub repository: String,
    pub pr_number: String,
}

impl PrContext {
    /// Build a context only when both the repository and the PR number are
    /// known and non-empty.
    pub fn from_parts(
        server_url: Option<&str>,
        repository: Option<&str>,
        pr_number: Option<&str>,
    ) -> Option<Self> {
        let repository = repository.map(str::trim).filter(|s| !s.is_empty())?;
        let pr_number = pr_number.map(str::trim).filter(|s| !s.is_empty())?;
        let server_url = server_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/');
        Some(PrContext {
            server_url: server_url.to_string(),
            repository: repository.to_string(),
            pr_number: pr_number.to_string(),
        })
    }

    /// URL of `line` on the right-hand side of the PR's "files" view.
    pub fn line_url(&self, file: &str, line: u32) -> String {
        format!(
            "{}/{}/pull/{}/files#diff-{}R{}",
            self.server_url,
            self.repository,
            self.pr_number,
            diff_anchor(file),
            line
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions<'a> {
    pub title: &'a str,
    pub footer: Option<&'a str>,
    pub context: Option<&'a PrContext>,
}

impl Default for ReportOptions<'_> {
    fn default() -> Self {
        ReportOptions {
            title: DEFAULT_TITLE,
            footer: None,
            context: None,
        }
    }
}

/// Anchor id of a file in the PR diff view: SHA-256 of the normalized path.
pub fn diff_anchor(file: &str) -> String {
    let hash = Sha256::digest(normalize_path(file).as_bytes());
    hex::encode(hash)
}

/// Line cell for the report table; plain text without PR context.
pub fn line_link(file: &str, line: u32, context: Option<&PrContext>) -> String {
    match context {
        Some(ctx) => format!("[{}]({})", line, ctx.line_url(file, line)),
        None => line.to_string(),
    }
}

/// One annotation per kept issue, in report order.
pub fn render_annotations(issues: &FilteredIssues) -> Vec<String> {
    issues
        .iter()
        .map(|is| {
            workflow::annotation(
                is.severity.annotation_level(),
                &is.file,
                is.line,
                &format!("{}: {}", is.rule, is.message),
            )
        })
        .collect()
}

/// `1 error, 2 warnings`; zero-count severities are omitted.
pub fn summary_line(counts: &Counts) -> String {
    Severity::ALL
        .iter()
        .filter(|sev| counts.get(**sev) > 0)
        .map(|sev| sev.count_phrase(counts.get(*sev)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fixed report emitted when nothing survived filtering.
pub fn render_no_issues(opts: &ReportOptions<'_>) -> String {
    let mut out = format!(
        "## ✅ {}\n\n**No issues found on modified lines!**\n",
        opts.title
    );
    push_footer(&mut out, opts.footer);
    out
}

/// Markdown report with one collapsible table per non-empty severity.
pub fn render_markdown(issues: &FilteredIssues, opts: &ReportOptions<'_>) -> String {
    let counts = issues.counts();
    if counts.total() == 0 {
        return render_no_issues(opts);
    }

    let mut out = format!(
        "## {}\n\n**Summary:** {} found\n\n",
        opts.title,
        summary_line(&counts)
    );
    for sev in Severity::ALL {
        let bucket = issues.bucket(sev);
        if bucket.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "<details>\n<summary>{} ({})</summary>\n\n",
            sev.section_title(),
            bucket.len()
        ));
        out.push_str("| File | Line | Rule | Message |\n");
        out.push_str("|------|------|------|----------|\n");
        for is in bucket {
            out.push_str(&render_row(is, opts.context));
        }
        out.push_str("\n</details>\n\n");
    }
    push_footer(&mut out, opts.footer);
    out
}

/// Counts file body: `errors=N`, `warnings=N`, `suggestions=N`.
pub fn render_counts(counts: &Counts) -> String {
    format!(
        "errors={}\nwarnings={}\nsuggestions={}\n",
        counts.errors, counts.warnings, counts.suggestions
    )
}

fn render_row(is: &Issue, context: Option<&PrContext>) -> String {
    format!(
        "| {} | {} | {} | {} |\n",
        escape_cell(&is.file),
        line_link(&is.file, is.line, context),
        escape_cell(&is.rule),
        escape_cell(&is.message)
    )
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace("\r\n", " ").replace('\n', " ")
}

fn push_footer(out: &mut String, footer: Option<&str>) {
    let Some(footer) = footer.map(str::trim).filter(|f| !f.is_empty()) else {
        return;
    };
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
    out.push_str(footer);
    out.push('\n');
}
