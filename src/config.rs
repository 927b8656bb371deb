//! Configuration discovery and effective settings resolution.
//!
//! lintscope reads `lintscope.toml|yaml|yml` from the working directory (or
//! the closest ancestor) and merges it with environment variables and CLI
//! flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `filter.files`: `files_to_lint.txt`
//! - `report.findings|ranges|report|counts`: `vale_output.json`,
//!   `line_ranges.txt`, `vale_report.md`, `issue_counts.txt`
//! - `report.title`: `Vale Linting Results`
//!
//! Overrides precedence: CLI > environment > config file > defaults.
//! Relative paths resolve against the working directory.

use crate::paths::{parse_patterns, FilterSettings};
use crate::render::{PrContext, DEFAULT_TITLE};
use crate::report::ReportSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_NAMES: [&str; 3] = ["lintscope.toml", "lintscope.yaml", "lintscope.yml"];

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// Patterns given either as one whitespace-separated string or a list.
pub enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    pub fn to_patterns(&self) -> Vec<String> {
        match self {
            PatternList::One(s) => parse_patterns(s),
            PatternList::Many(v) => v.iter().flat_map(|s| parse_patterns(s)).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[filter]` section.
pub struct FilterCfg {
    pub include_paths: Option<PatternList>,
    pub files: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[report]` section.
pub struct ReportCfg {
    pub findings: Option<String>,
    pub ranges: Option<String>,
    pub report: Option<String>,
    pub counts: Option<String>,
    pub title: Option<String>,
    pub footer: Option<String>,
    pub repository: Option<String>,
    pub server_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `lintscope.toml|yaml`.
pub struct LintscopeConfig {
    pub debug: Option<bool>,
    pub output: Option<String>,
    #[serde(default)]
    pub filter: Option<FilterCfg>,
    #[serde(default)]
    pub report: Option<ReportCfg>,
}

/// Environment captured once at startup.
#[derive(Debug, Clone, Default)]
pub struct EnvInputs {
    pub include_paths: Option<String>,
    pub debug: Option<String>,
    pub github_output: Option<String>,
    pub repository: Option<String>,
    pub pr_number: Option<String>,
    pub server_url: Option<String>,
}

impl EnvInputs {
    pub fn from_process() -> Self {
        let var = |k: &str| std::env::var(k).ok();
        EnvInputs {
            include_paths: var("INCLUDE_PATHS"),
            debug: var("DEBUG"),
            github_output: var("GITHUB_OUTPUT"),
            repository: var("GITHUB_REPOSITORY"),
            pr_number: var("PR_NUMBER"),
            server_url: var("GITHUB_SERVER_URL"),
        }
    }
}

/// Flags collected from the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub workdir: Option<String>,
    pub debug: bool,
    pub output: Option<String>,
    pub include: Vec<String>,
    pub files: Option<String>,
    pub findings: Option<String>,
    pub ranges: Option<String>,
    pub report: Option<String>,
    pub counts: Option<String>,
    pub title: Option<String>,
    pub repository: Option<String>,
    pub pr_number: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub workdir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub debug: bool,
    pub output: String,
    pub step_output: Option<PathBuf>,
    pub patterns: Vec<String>,
    pub files: PathBuf,
    pub findings: PathBuf,
    pub ranges: PathBuf,
    pub report: PathBuf,
    pub counts: PathBuf,
    pub title: String,
    pub footer: Option<String>,
    pub context: Option<PrContext>,
}

impl Effective {
    pub fn filter_settings(&self) -> FilterSettings {
        FilterSettings {
            patterns: self.patterns.clone(),
            files: self.files.clone(),
            step_output: self.step_output.clone(),
        }
    }

    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            findings: self.findings.clone(),
            ranges: self.ranges.clone(),
            report: self.report.clone(),
            counts: self.counts.clone(),
            title: self.title.clone(),
            footer: self.footer.clone(),
            context: self.context.clone(),
        }
    }
}

/// Walk upward from `start` to find the directory holding the config.
///
/// Stops when a `lintscope.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_config_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `LintscopeConfig` from the first config file present in `root`.
///
/// `Ok(None)` when there is no config file; `Err` carries a human-readable
/// reason when one exists but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<Option<(PathBuf, LintscopeConfig)>, String> {
    for name in CONFIG_NAMES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let s = fs::read_to_string(&p).map_err(|e| format!("{}: {}", p.display(), e))?;
        let cfg: LintscopeConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|e| format!("{}: {}", p.display(), e))?
        } else {
            serde_yaml::from_str(&s).map_err(|e| format!("{}: {}", p.display(), e))?
        };
        return Ok(Some((p, cfg)));
    }
    Ok(None)
}

fn truthy(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("true")
}

fn non_empty(s: Option<&String>) -> Option<&str> {
    s.map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Resolve `Effective` by merging CLI flags, environment, discovered
/// config, and defaults. Returned notes describe config problems that were
/// skipped over; the caller logs them once logging is up.
pub fn resolve_effective(cli: &CliOverrides, env: &EnvInputs) -> (Effective, Vec<String>) {
    let mut notes = Vec::new();
    let workdir = PathBuf::from(cli.workdir.as_deref().unwrap_or("."));
    let root = detect_config_root(&workdir);
    let (config_path, cfg) = match load_config(&root) {
        Ok(Some((p, c))) => (Some(p), c),
        Ok(None) => (None, LintscopeConfig::default()),
        Err(e) => {
            notes.push(format!("Ignoring unreadable config {}", e));
            (None, LintscopeConfig::default())
        }
    };
    let filter = cfg.filter.clone().unwrap_or_default();
    let report = cfg.report.clone().unwrap_or_default();
    let at = |p: String| workdir.join(p);

    let debug = cli.debug
        || env.debug.as_deref().map(truthy).unwrap_or(false)
        || cfg.debug.unwrap_or(false);

    let output = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let patterns = if !cli.include.is_empty() {
        cli.include.iter().flat_map(|s| parse_patterns(s)).collect()
    } else if let Some(raw) = non_empty(env.include_paths.as_ref()) {
        parse_patterns(raw)
    } else {
        filter
            .include_paths
            .as_ref()
            .map(PatternList::to_patterns)
            .unwrap_or_default()
    };

    let files = at(cli
        .files
        .clone()
        .or(filter.files)
        .unwrap_or_else(|| "files_to_lint.txt".to_string()));
    let findings = at(cli
        .findings
        .clone()
        .or(report.findings)
        .unwrap_or_else(|| "vale_output.json".to_string()));
    let ranges = at(cli
        .ranges
        .clone()
        .or(report.ranges)
        .unwrap_or_else(|| "line_ranges.txt".to_string()));
    let report_path = at(cli
        .report
        .clone()
        .or(report.report)
        .unwrap_or_else(|| "vale_report.md".to_string()));
    let counts = at(cli
        .counts
        .clone()
        .or(report.counts)
        .unwrap_or_else(|| "issue_counts.txt".to_string()));

    let title = cli
        .title
        .clone()
        .or(report.title)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let repository = non_empty(cli.repository.as_ref())
        .or(non_empty(env.repository.as_ref()))
        .or(non_empty(report.repository.as_ref()));
    let server_url = non_empty(env.server_url.as_ref()).or(non_empty(report.server_url.as_ref()));
    let pr_number = non_empty(cli.pr_number.as_ref()).or(non_empty(env.pr_number.as_ref()));
    let context = PrContext::from_parts(server_url, repository, pr_number);

    // GITHUB_OUTPUT is provided by the runner; keep it as given.
    let step_output = non_empty(env.github_output.as_ref()).map(PathBuf::from);

    (
        Effective {
            workdir,
            config_path,
            debug,
            output,
            step_output,
            patterns,
            files,
            findings,
            ranges,
            report: report_path,
            counts,
            title,
            footer: report.footer,
            context,
        },
        notes,
    )
}
