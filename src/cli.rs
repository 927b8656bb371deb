//! CLI argument parsing via `clap`.

use crate::config::CliOverrides;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "lintscope",
    version,
    about = "Scope documentation lint results to a pull request",
    long_about = "lintscope: filter the list of files to lint by include paths, and turn linter findings into annotations, a markdown report, and issue counts restricted to modified lines.\n\nConfiguration precedence: CLI > environment > lintscope.toml > defaults.",
    after_help = "Examples:\n  INCLUDE_PATHS=\"docs/team-a docs/**/*.md\" lintscope filter\n  lintscope report --repository acme/docs --pr-number 42\n  lintscope report --findings out/vale.json --ranges out/ranges.txt --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Verbose diagnostics (also enabled by DEBUG=true)
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current lintscope version.")]
    Version,
    /// Filter the file list by include paths
    #[command(
        about = "Filter files to lint by include paths",
        long_about = "Keep only files matching at least one glob or directory prefix. The list is rewritten in place, or removed when nothing matches, and has_files is appended to GITHUB_OUTPUT.",
        after_help = "Examples:\n  lintscope filter --include docs/team-a --include 'guides/**/*.md'\n  INCLUDE_PATHS=docs lintscope filter --files changed.txt"
    )]
    Filter {
        #[arg(long, help = "Working directory for relative paths (default: current dir)")]
        workdir: Option<String>,
        #[arg(long = "include", value_name = "PATTERN", help = "Glob or directory prefix; repeatable (default: INCLUDE_PATHS)")]
        include: Vec<String>,
        #[arg(long, help = "File list to filter (default: files_to_lint.txt)")]
        files: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Report linter findings on modified lines
    #[command(
        about = "Report lint issues on modified lines",
        long_about = "Restrict linter findings to modified line ranges, print annotations, and write the markdown report and issue counts.",
        after_help = "Examples:\n  lintscope report\n  lintscope report --repository acme/docs --pr-number 42 --output json"
    )]
    Report {
        #[arg(long, help = "Working directory for relative paths (default: current dir)")]
        workdir: Option<String>,
        #[arg(long, help = "Linter JSON output (default: vale_output.json)")]
        findings: Option<String>,
        #[arg(long, help = "Modified line ranges, path|start|count (default: line_ranges.txt)")]
        ranges: Option<String>,
        #[arg(long, help = "Markdown report to write (default: vale_report.md)")]
        report: Option<String>,
        #[arg(long, help = "Counts file to write (default: issue_counts.txt)")]
        counts: Option<String>,
        #[arg(long, help = "Report heading (default: Vale Linting Results)")]
        title: Option<String>,
        #[arg(long, help = "Repository owner/name for line links (default: GITHUB_REPOSITORY)")]
        repository: Option<String>,
        #[arg(long, help = "Pull request number for line links (default: PR_NUMBER)")]
        pr_number: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
}

impl Cli {
    /// Flatten the parsed command into config overrides.
    pub fn overrides(&self) -> CliOverrides {
        let mut o = CliOverrides {
            debug: self.debug,
            ..CliOverrides::default()
        };
        match &self.cmd {
            Commands::Version => {}
            Commands::Filter {
                workdir,
                include,
                files,
                output,
            } => {
                o.workdir = workdir.clone();
                o.include = include.clone();
                o.files = files.clone();
                o.output = output.clone();
            }
            Commands::Report {
                workdir,
                findings,
                ranges,
                report,
                counts,
                title,
                repository,
                pr_number,
                output,
            } => {
                o.workdir = workdir.clone();
                o.findings = findings.clone();
                o.ranges = ranges.clone();
                o.report = report.clone();
                o.counts = counts.clone();
                o.title = title.clone();
                o.repository = repository.clone();
                o.pr_number = pr_number.clone();
                o.output = output.clone();
            }
        }
        o
    }
}
