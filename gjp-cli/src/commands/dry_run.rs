//! `gjp dry-run` — enter the dry-running phase.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use gjp_phases::{PhaseMachine, StartOutcome};

use super::project_at;

/// Arguments for `gjp dry-run`.
#[derive(Args, Debug)]
pub struct DryRunArgs {
    /// Run against this directory instead of the current one.
    #[arg(long)]
    pub path: Option<PathBuf>,
}

impl DryRunArgs {
    pub fn run(self) -> Result<()> {
        let machine = PhaseMachine::for_project(project_at(self.path)?);
        match machine.dry_run()? {
            StartOutcome::Started => {
                println!("{} dry run started — sources will be restored on finish", "✓".green());
            }
            StartOutcome::AlreadyActive => {
                println!("{} dry run already active — nothing to do", "·".yellow());
            }
        }
        Ok(())
    }
}
