//! `gjp new <path> [--name <name>]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gjp_phases::scaffold;

/// Arguments for `gjp new`.
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Directory to create the project in (created if absent).
    pub path: PathBuf,

    /// Project name used in the seeded boilerplate; defaults to the
    /// directory name.
    #[arg(long)]
    pub name: Option<String>,
}

impl NewArgs {
    pub fn run(self) -> Result<()> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .context("cannot derive a project name from the path; pass --name")?,
        };

        let project = scaffold::create_project(&self.path, &name)
            .with_context(|| format!("failed to create project at '{}'", self.path.display()))?;

        println!(
            "✓ Created gjp project '{}' at {}",
            name,
            project.root().display()
        );
        println!("  src/, kit/ and file_lists/ are ready; run `gjp gather` to begin");
        Ok(())
    }
}
