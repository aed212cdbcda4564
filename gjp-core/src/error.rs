//! Error types for gjp-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from project resolution and phase storage.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No directory from the start path up to the filesystem root passed
    /// the structural check (`src/`, `kit/`, `.git/`).
    #[error("no gjp project found at or above '{start}'")]
    InvalidProject { start: PathBuf },

    /// Both phase marker files exist at once — the working copy was
    /// modified outside of gjp.
    #[error(
        "conflicting phase markers at '{root}'; remove one of 'gathering' / 'dry_running'"
    )]
    ConflictingMarkers { root: PathBuf },

    /// Underlying I/O failure, with the offending path.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
