//! Workflow-command protocol understood by the CI runner.
//!
//! Lines of the form `::name key=value,key=value::message` printed to
//! stdout/stderr are turned into log groups, annotations and notices by the
//! runner. Step outputs are `name=value` lines appended to the file named by
//! `GITHUB_OUTPUT`. All marker strings live here so the rest of the crate
//! never spells them out.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Severity markers recognized by the runner.
pub enum Level {
    Debug,
    Notice,
    Warning,
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }

    /// Map a `tracing` level onto the closest runner marker.
    pub fn from_tracing(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::ERROR => Level::Error,
            tracing::Level::WARN => Level::Warning,
            tracing::Level::INFO => Level::Notice,
            _ => Level::Debug,
        }
    }
}

/// Build an annotation line tying `message` to `file` at `line`.
pub fn annotation(level: Level, file: &str, line: u32, message: &str) -> String {
    format!(
        "::{} file={},line={}::{}",
        level.as_str(),
        escape_property(file),
        line,
        escape_data(message)
    )
}

/// Build a bare marker line without location properties.
pub fn marker(level: Level, message: &str) -> String {
    format!("::{}::{}", level.as_str(), escape_data(message))
}

/// Escape a message body. The runner decodes `%25`, `%0D` and `%0A`.
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

/// Escape a property value; `:` and `,` delimit properties.
pub fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

/// Append `name=value` to the step output file.
pub fn append_output(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let mut f = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(f, "{}={}", name, value)
}
