//! Project scaffolding for `gjp new`.
//!
//! Seeds the on-disk layout (`src/`, `kit/`, `file_lists/`), renders
//! boilerplate from embedded templates, initialises the repository and
//! takes the initial snapshot.

use std::path::Path;

use tera::{Context, Tera};

use gjp_core::project::{Project, FILE_LISTS_DIR, KIT_DIR, SRC_DIR};
use gjp_vcs::{Git, SnapshotLedger};

use crate::error::{io_err, PhaseError};

// Boilerplate baked into the binary at compile time via include_str!.
// Template name doubles as the output path relative to the project root.
const TPLS: &[(&str, &str)] = &[
    ("build.xml", include_str!("templates/build.xml.tera")),
    ("README.md", include_str!("templates/readme.md.tera")),
];

/// Create a fresh gjp project at `path` and return it resolved.
///
/// Fails with [`PhaseError::TargetExists`] if `path` already contains a
/// project.
pub fn create_project(path: &Path, name: &str) -> Result<Project, PhaseError> {
    if Project::open(path).is_ok() {
        return Err(PhaseError::TargetExists {
            path: path.to_path_buf(),
        });
    }

    for dir in [SRC_DIR, KIT_DIR, FILE_LISTS_DIR] {
        let dir_path = path.join(dir);
        std::fs::create_dir_all(&dir_path).map_err(|e| io_err(&dir_path, e))?;
        // Keeps the empty subtrees present in every snapshot.
        let keep = dir_path.join(".gitkeep");
        std::fs::write(&keep, b"").map_err(|e| io_err(keep, e))?;
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(TPLS.to_vec())?;
    let mut context = Context::new();
    context.insert("name", name);
    for (template_name, _) in TPLS {
        let rendered = tera.render(template_name, &context)?;
        let target = path.join(template_name);
        std::fs::write(&target, rendered).map_err(|e| io_err(target, e))?;
    }

    let git = Git::init(path)?;
    ensure_identity(&git)?;
    SnapshotLedger::new(git).take_snapshot(&format!("gjp: new project '{name}'"), None)?;

    tracing::info!("created project '{name}' at {}", path.display());
    Ok(Project::open(path)?)
}

/// Snapshots need a committer identity; machines without a global git
/// identity get a repo-local one.
fn ensure_identity(git: &Git) -> Result<(), PhaseError> {
    if git.config_get("user.email")?.is_none() {
        git.config_set("user.name", "gjp")?;
        git.config_set("user.email", "gjp@localhost")?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
