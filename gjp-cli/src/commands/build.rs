//! `gjp build` — dispatch to the external Java build tool.
//!
//! The tool's output is echoed live and never interpreted; a non-zero exit
//! surfaces as a fatal error carrying the command text and status.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use gjp_vcs::CommandLine;

use super::project_at;

/// Arguments for `gjp build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Build tool executable to run in the project root.
    #[arg(long, default_value = "ant")]
    pub tool: String,

    /// Run against this directory instead of the current one.
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Arguments passed through to the build tool untouched.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let project = project_at(self.path)?;
        CommandLine::new(&self.tool)
            .args(self.args)
            .current_dir(project.root())
            .echo(true)
            .run()?;
        Ok(())
    }
}
