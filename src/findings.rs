//! Linter findings ingest.
//!
//! Vale's JSON output maps each file path to an array of alerts. Only the
//! fields the reporter renders are read; everything else is ignored. File
//! order follows the document (`serde_json` is built with
//! `preserve_order`).

use serde::Deserialize;
use serde_json::{Map, Value as Json};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
/// One alert as emitted by the linter.
pub struct RawIssue {
    #[serde(rename = "Line", default)]
    pub line: u32,
    #[serde(rename = "Severity", default)]
    pub severity: Option<String>,
    #[serde(rename = "Check", default)]
    pub check: Option<String>,
    #[serde(rename = "Message", default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// All findings, grouped per file in document order.
pub struct Findings {
    pub files: Vec<(String, Vec<RawIssue>)>,
}

impl Findings {
    /// Parse the linter's JSON document. The top level must be an object
    /// whose values are arrays. An alert that does not have the expected
    /// shape is skipped with a warning; the rest of the file is kept.
    pub fn parse(s: &str) -> Result<Self, serde_json::Error> {
        let map: Map<String, Json> = serde_json::from_str(s)?;
        let mut files = Vec::with_capacity(map.len());
        for (file, alerts) in map {
            let alerts: Vec<Json> = serde_json::from_value(alerts)?;
            let mut issues = Vec::with_capacity(alerts.len());
            for (idx, alert) in alerts.into_iter().enumerate() {
                match serde_json::from_value::<RawIssue>(alert) {
                    Ok(issue) => issues.push(issue),
                    Err(e) => warn!("Skipping malformed alert #{} for {}: {}", idx + 1, file, e),
                }
            }
            files.push((file, issues));
        }
        Ok(Findings { files })
    }

    /// Load findings from `path`. A missing or malformed document is
    /// reported and treated as "nothing found".
    pub fn load(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Linter output file not found: {}", path.display());
                return Findings::default();
            }
            Err(e) => {
                warn!("Failed to read linter output {}: {}", path.display(), e);
                return Findings::default();
            }
        };
        match Findings::parse(&data) {
            Ok(f) => {
                debug!(
                    "Linter reported {} issue(s) across {} file(s)",
                    f.total_issues(),
                    f.files.len()
                );
                f
            }
            Err(e) => {
                warn!("Failed to parse linter JSON output: {}", e);
                Findings::default()
            }
        }
    }

    pub fn total_issues(&self) -> usize {
        self.files.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_keeps_file_order_and_defaults() {
        let s = r#"{
  "z.md": [{"Line": 5, "Severity": "error", "Check": "Vale.Spacing", "Message": "bad space", "Span": [1, 2]}],
  "a.md": [{"Message": "no line"}]
}"#;
        let f = Findings::parse(s).unwrap();
        assert_eq!(f.files[0].0, "z.md");
        assert_eq!(f.files[1].0, "a.md");
        assert_eq!(f.files[0].1[0].line, 5);
        assert_eq!(f.files[0].1[0].check.as_deref(), Some("Vale.Spacing"));
        let bare = &f.files[1].1[0];
        assert_eq!(bare.line, 0);
        assert!(bare.severity.is_none());
        assert_eq!(f.total_issues(), 2);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(Findings::parse("[1, 2]").is_err());
        assert!(Findings::parse(r#"{"a.md": "nope"}"#).is_err());
        assert!(Findings::parse("{").is_err());
    }

    #[test]
    fn test_parse_skips_only_malformed_alerts() {
        let s = r#"{"a.md": [
  {"Line": 5, "Severity": "error", "Check": "Spacing", "Message": "bad space"},
  {"Line": null, "Severity": "error"},
  "not an alert"
]}"#;
        let f = Findings::parse(s).unwrap();
        assert_eq!(f.files.len(), 1);
        assert_eq!(f.total_issues(), 1);
        assert_eq!(f.files[0].1[0].line, 5);
    }

    #[test]
    fn test_load_missing_and_malformed_yield_empty() {
        let dir = tempdir().unwrap();
        assert!(Findings::load(&dir.path().join("absent.json")).is_empty());
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        assert!(Findings::load(&bad).is_empty());
    }

    #[test]
    fn test_load_empty_object_is_empty() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("vale_output.json");
        std::fs::write(&p, "{}").unwrap();
        let f = Findings::load(&p);
        assert!(f.is_empty());
        assert_eq!(f.total_issues(), 0);
    }
}
