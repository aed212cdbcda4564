//! `gjp gather` — enter the gathering phase.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use gjp_phases::{PhaseMachine, StartOutcome};

use super::project_at;

/// Arguments for `gjp gather`.
#[derive(Args, Debug)]
pub struct GatherArgs {
    /// Run against this directory instead of the current one.
    #[arg(long)]
    pub path: Option<PathBuf>,
}

impl GatherArgs {
    pub fn run(self) -> Result<()> {
        let machine = PhaseMachine::for_project(project_at(self.path)?);
        match machine.gather()? {
            StartOutcome::Started => {
                println!("{} gathering started", "✓".green());
            }
            StartOutcome::AlreadyActive => {
                println!("{} gathering already active — nothing to do", "·".yellow());
            }
        }
        Ok(())
    }
}
