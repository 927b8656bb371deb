//! Output rendering for the filter and report commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is one
//! document per run with a top-level summary.

use crate::paths::{FilterOutcome, FilterStatus};
use crate::report::ReportOutcome;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn print_json(v: &JsonVal) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{}", s),
        Err(e) => tracing::error!("Failed to render JSON output: {}", e),
    }
}

/// Print the result of filtering the file list.
pub fn print_filter(res: &FilterOutcome, output: &str) {
    if output == "json" {
        print_json(&compose_filter_json(res));
        return;
    }
    let color = use_colors(output);
    match res.status {
        FilterStatus::NoPatterns => println!("No patterns provided"),
        FilterStatus::NoFileList => println!("No {} found", res.files.display()),
        FilterStatus::Filtered => {
            println!(
                "Filtered {} files against {} patterns",
                res.total,
                res.patterns.len()
            );
            if res.has_files() {
                let head = format!("Files after filtering ({}):", res.kept.len());
                if color {
                    println!("{}", head.green().bold());
                } else {
                    println!("{}", head);
                }
                for f in &res.kept {
                    println!("  {}", f);
                }
            } else if color {
                println!("{}", "No files matched include-paths patterns".yellow());
            } else {
                println!("No files matched include-paths patterns");
            }
        }
    }
}

/// Emit annotation lines for the runner. In `json` mode they go to stderr
/// so stdout stays a single JSON document.
pub fn print_annotations(res: &ReportOutcome, output: &str) {
    // Annotations are protocol lines; never colorize them.
    for line in &res.annotations {
        if output == "json" {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Print the run summary after the artifacts are written.
pub fn print_report(res: &ReportOutcome, output: &str) {
    if output == "json" {
        print_json(&compose_report_json(res));
        return;
    }
    if !res.had_findings {
        println!("No lint issues found or empty output");
        return;
    }
    let c = &res.counts;
    let summary = format!(
        "Generated report with {} issue(s): {} errors, {} warnings, {} suggestions",
        c.total(),
        c.errors,
        c.warnings,
        c.suggestions
    );
    if use_colors(output) {
        let summary = if c.errors > 0 {
            summary.red().bold().to_string()
        } else if c.warnings > 0 {
            summary.yellow().bold().to_string()
        } else {
            summary.green().bold().to_string()
        };
        println!("{}", summary);
    } else {
        println!("{}", summary);
    }
}

/// Compose filter JSON object (pure) for testing purposes.
pub fn compose_filter_json(res: &FilterOutcome) -> JsonVal {
    json!({
        "status": res.status,
        "patterns": res.patterns,
        "file_list": res.files,
        "files": res.kept,
        "summary": {
            "total": res.total,
            "kept": res.kept.len(),
            "has_files": res.has_files(),
        }
    })
}

/// Compose report JSON object (pure) for testing purposes.
pub fn compose_report_json(res: &ReportOutcome) -> JsonVal {
    let issues: Vec<_> = res.issues.iter().collect();
    json!({
        "issues": issues,
        "annotations": res.annotations,
        "report": res.report,
        "counts_file": res.counts_file,
        "filter": res.stats,
        "summary": {
            "errors": res.counts.errors,
            "warnings": res.counts.warnings,
            "suggestions": res.counts.suggestions,
            "total": res.counts.total(),
        }
    })
}
