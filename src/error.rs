//! Fatal errors. Only failures to produce a required artifact end up here;
//! problems with inputs are absorbed where they are read.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to write {what} to {}: {source}", .path.display())]
    Write {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to set step output '{name}' in {}: {source}", .path.display())]
    StepOutput {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Write `contents` to `path`, mapping failures to [`Error::Write`].
pub(crate) fn write_artifact(
    what: &'static str,
    path: &std::path::Path,
    contents: &str,
) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::Write {
        what,
        path: path.to_path_buf(),
        source,
    })
}
