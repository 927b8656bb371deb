//! Shared data models for the reporter pipeline.

pub mod severity;

pub use severity::Severity;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A finding kept after line filtering. `file` is the path as the linter
/// reported it, not the normalized form used for matching.
pub struct Issue {
    pub file: String,
    pub line: u32,
    pub rule: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
/// Per-severity totals persisted for downstream steps.
pub struct Counts {
    pub errors: usize,
    pub warnings: usize,
    pub suggestions: usize,
}

impl Counts {
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.suggestions
    }

    pub fn get(&self, sev: Severity) -> usize {
        match sev {
            Severity::Error => self.errors,
            Severity::Warning => self.warnings,
            Severity::Suggestion => self.suggestions,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Kept issues bucketed by severity; each bucket keeps input order.
pub struct FilteredIssues {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub suggestions: Vec<Issue>,
}

impl FilteredIssues {
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
            Severity::Suggestion => self.suggestions.push(issue),
        }
    }

    pub fn bucket(&self, sev: Severity) -> &[Issue] {
        match sev {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Suggestion => &self.suggestions,
        }
    }

    /// All issues, errors first, then warnings, then suggestions.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.suggestions.iter())
    }

    pub fn counts(&self) -> Counts {
        Counts {
            errors: self.errors.len(),
            warnings: self.warnings.len(),
            suggestions: self.suggestions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.counts().total() == 0
    }
}
