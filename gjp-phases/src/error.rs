//! Error types for gjp-phases.

use std::path::PathBuf;

use thiserror::Error;

use gjp_core::CoreError;
use gjp_vcs::VcsError;

/// All errors that can arise from phase transitions and scaffolding.
#[derive(Debug, Error)]
pub enum PhaseError {
    /// An error from project resolution or phase storage.
    #[error("project error: {0}")]
    Core(#[from] CoreError),

    /// An error from the version-control adapter.
    #[error("version control error: {0}")]
    Vcs(#[from] VcsError),

    /// Boilerplate template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    /// `gjp new` target already holds a project.
    #[error("'{path}' already contains a gjp project")]
    TargetExists { path: PathBuf },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`PhaseError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PhaseError {
    PhaseError::Io {
        path: path.into(),
        source,
    }
}
