//! gjp — phase-managed Java project working directories.
//!
//! # Usage
//!
//! ```text
//! gjp new <path> [--name <name>]
//! gjp gather [--path <dir>]
//! gjp dry-run [--path <dir>]
//! gjp finish [--path <dir>]
//! gjp status [--path <dir>] [--json]
//! gjp build [--tool <program>] [--path <dir>] [ARGS...]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    build::BuildArgs, dry_run::DryRunArgs, finish::FinishArgs, gather::GatherArgs, new::NewArgs,
    status::StatusArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "gjp",
    version,
    about = "Gathering and dry-run phase cycles for Java project trees",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a fresh gjp project.
    New(NewArgs),

    /// Enter the gathering phase (collect upstream source/kit material).
    Gather(GatherArgs),

    /// Enter the dry-running phase (trial build; sources restored on finish).
    DryRun(DryRunArgs),

    /// Close the active phase.
    Finish(FinishArgs),

    /// Show the active phase, tag counters and recorded file lists.
    Status(StatusArgs),

    /// Run the external Java build tool in the project root.
    Build(BuildArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::New(args) => args.run(),
        Commands::Gather(args) => args.run(),
        Commands::DryRun(args) => args.run(),
        Commands::Finish(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Build(args) => args.run(),
    }
}
