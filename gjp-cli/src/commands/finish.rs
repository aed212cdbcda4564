//! `gjp finish` — close the active phase.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use gjp_phases::PhaseMachine;

use super::project_at;

/// Arguments for `gjp finish`.
#[derive(Args, Debug)]
pub struct FinishArgs {
    /// Run against this directory instead of the current one.
    #[arg(long)]
    pub path: Option<PathBuf>,
}

impl FinishArgs {
    pub fn run(self) -> Result<()> {
        let machine = PhaseMachine::for_project(project_at(self.path)?);
        match machine.finish()? {
            Some(phase) => {
                println!("{} {phase} finished", "✓".green());
            }
            None => {
                println!("{} no phase active — nothing to finish", "·".yellow());
            }
        }
        Ok(())
    }
}
