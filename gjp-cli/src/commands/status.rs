//! `gjp status` — phase, tag-counter and file-list visibility.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use gjp_core::{file_list, Phase, Project, TagType};
use gjp_phases::PhaseMachine;
use gjp_vcs::tag_name;

use super::project_at;

/// Arguments for `gjp status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Run against this directory instead of the current one.
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone)]
struct TagRow {
    tag_type: TagType,
    count: u64,
}

#[derive(Serialize)]
struct StatusJson {
    root: String,
    phase: Option<Phase>,
    tags: Vec<TagJson>,
    file_lists: Vec<FileListJson>,
}

#[derive(Serialize)]
struct TagJson {
    tag_type: TagType,
    count: u64,
    latest: Option<String>,
}

#[derive(Serialize)]
struct FileListJson {
    name: String,
    entries: usize,
}

#[derive(Tabled)]
struct TagTableRow {
    #[tabled(rename = "event")]
    event: String,
    #[tabled(rename = "count")]
    count: u64,
    #[tabled(rename = "latest tag")]
    latest: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let project = project_at(self.path)?;
        let machine = PhaseMachine::for_project(project.clone());
        let phase = machine.current_phase()?;

        let mut tag_rows = Vec::new();
        for tag_type in TagType::ALL {
            let count = machine
                .ledger()
                .latest_tag_count(tag_type)
                .with_context(|| format!("cannot read {tag_type} tags"))?;
            tag_rows.push(TagRow { tag_type, count });
        }
        let file_lists = collect_file_lists(&project)?;

        if self.json {
            print_json(&project, phase, &tag_rows, &file_lists)?;
            return Ok(());
        }
        print_human(&project, phase, &tag_rows, &file_lists);
        Ok(())
    }
}

fn collect_file_lists(project: &Project) -> Result<Vec<(String, usize)>> {
    let dir = project.file_lists_dir();
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut lists = Vec::new();
    let entries =
        std::fs::read_dir(&dir).with_context(|| format!("cannot read '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("cannot read '{}'", dir.display()))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name.ends_with(".tmp") {
            continue;
        }
        let count = file_list::load(&entry.path())?.len();
        lists.push((name, count));
    }
    lists.sort();
    Ok(lists)
}

fn print_json(
    project: &Project,
    phase: Option<Phase>,
    tag_rows: &[TagRow],
    file_lists: &[(String, usize)],
) -> Result<()> {
    let payload = StatusJson {
        root: project.root().display().to_string(),
        phase,
        tags: tag_rows
            .iter()
            .map(|row| TagJson {
                tag_type: row.tag_type,
                count: row.count,
                latest: (row.count > 0).then(|| tag_name(row.tag_type, row.count)),
            })
            .collect(),
        file_lists: file_lists
            .iter()
            .map(|(name, entries)| FileListJson {
                name: name.clone(),
                entries: *entries,
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_human(
    project: &Project,
    phase: Option<Phase>,
    tag_rows: &[TagRow],
    file_lists: &[(String, usize)],
) {
    println!(
        "gjp v{} | {}",
        env!("CARGO_PKG_VERSION"),
        project.root().display()
    );
    match phase {
        Some(phase) => println!("phase: {}", phase.to_string().green().bold()),
        None => println!("phase: {}", "none".bright_black()),
    }

    let table_rows: Vec<TagTableRow> = tag_rows
        .iter()
        .map(|row| TagTableRow {
            event: row.tag_type.to_string(),
            count: row.count,
            latest: if row.count > 0 {
                tag_name(row.tag_type, row.count)
            } else {
                "—".to_string()
            },
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if file_lists.is_empty() {
        println!("No file lists recorded yet.");
        return;
    }
    println!("file lists:");
    for (name, entries) in file_lists {
        println!("  {name} ({entries} entries)");
    }
}
