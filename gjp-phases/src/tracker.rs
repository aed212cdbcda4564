//! Changed-file list tracker.
//!
//! At phase close, every tracked subtree (the kit, and each source
//! package) gets the paths it changed since the phase-start tag merged
//! into its persisted list under `file_lists/`.

use gjp_core::{
    file_list,
    project::{Project, SRC_DIR},
    types::TagType,
};
use gjp_vcs::SnapshotLedger;

use crate::error::PhaseError;

/// Merge every path changed under `dir` since the newest `since` tag into
/// the persisted list `list_name`.
///
/// `dir` is relative to the project root; stored paths have the `dir`
/// prefix stripped. Idempotent: re-running with the same tag and no new
/// commits rewrites an identical file.
pub fn update_changed_file_list(
    ledger: &SnapshotLedger,
    project: &Project,
    dir: &str,
    list_name: &str,
    since: TagType,
) -> Result<(), PhaseError> {
    let path = file_list::list_path(project, list_name);
    let mut entries = file_list::load(&path)?;
    let before = entries.len();

    let prefix = format!("{dir}/");
    for changed in ledger.changed_since(since)? {
        if let Some(rel) = changed.strip_prefix(&prefix) {
            entries.insert(rel.to_owned());
        }
    }

    tracing::debug!(
        "list {list_name}: {} entries ({} new)",
        entries.len(),
        entries.len() - before
    );
    file_list::save(&path, &entries)?;
    Ok(())
}

/// Update one list per immediate subdirectory of `src/`, each named
/// `<package>_<suffix>`, so every source package gets its own independent
/// changed-file list.
pub fn update_changed_src_file_lists(
    ledger: &SnapshotLedger,
    project: &Project,
    suffix: &str,
    since: TagType,
) -> Result<(), PhaseError> {
    for package in project.src_packages()? {
        let dir = format!("{SRC_DIR}/{package}");
        let list_name = format!("{package}_{suffix}");
        update_changed_file_list(ledger, project, &dir, &list_name, since)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
