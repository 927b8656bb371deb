//! Severity buckets for linter findings.

use crate::workflow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
/// Issue importance. Ordering follows report order: errors first.
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Suggestion];

    /// Classify a linter-declared severity. Case-insensitive; anything
    /// missing or unrecognized lands in the lowest bucket.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("error") => Severity::Error,
            Some("warning") => Severity::Warning,
            _ => Severity::Suggestion,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
        }
    }

    /// Annotation level shown inline in the pull request diff.
    pub fn annotation_level(self) -> workflow::Level {
        match self {
            Severity::Error => workflow::Level::Error,
            Severity::Warning => workflow::Level::Warning,
            Severity::Suggestion => workflow::Level::Notice,
        }
    }

    /// `1 error`, `2 warnings`, ...
    pub fn count_phrase(self, n: usize) -> String {
        let plural = if n == 1 { "" } else { "s" };
        format!("{} {}{}", n, self.as_str(), plural)
    }

    /// Heading of the collapsible report section.
    pub fn section_title(self) -> &'static str {
        match self {
            Severity::Error => "❌ Errors",
            Severity::Warning => "⚠️ Warnings",
            Severity::Suggestion => "💡 Suggestions",
        }
    }
}
