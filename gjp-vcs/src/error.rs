//! Error types for gjp-vcs.

use thiserror::Error;

/// All errors that can arise from running external commands.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The child process could not be started at all.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The child process exited non-zero. Carries the rendered command
    /// text and captured stderr so callers can surface it verbatim.
    #[error("command '{command}' exited with status {status}: {stderr}")]
    Command {
        command: String,
        status: i32,
        stderr: String,
    },
}
