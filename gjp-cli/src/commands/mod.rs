//! Subcommand implementations.

pub mod build;
pub mod dry_run;
pub mod finish;
pub mod gather;
pub mod new;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};

use gjp_core::Project;

/// Resolve the project from `path`, or from the current working directory
/// when no path was given.
pub(crate) fn project_at(path: Option<PathBuf>) -> Result<Project> {
    let start = match path {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    Project::locate(&start)
        .with_context(|| format!("'{}' is not inside a gjp project", start.display()))
}
