//! Changed-file list persistence.
//!
//! One sorted, deduplicated, line-oriented file per tracked subtree under
//! `file_lists/` at the project root. Lists only grow: every save is the
//! union of the prior contents and the newly changed paths, so re-running
//! an update with no intervening changes is byte-identical.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};
use crate::project::Project;

/// Path of the list file for `list_name`.
pub fn list_path(project: &Project, list_name: &str) -> PathBuf {
    project.file_lists_dir().join(list_name)
}

/// Load a persisted list. Returns an empty set if the file does not exist.
pub fn load(path: &Path) -> Result<BTreeSet<String>, CoreError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
        Err(e) => return Err(io_err(path, e)),
    };
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Save a list atomically: write a `.tmp` sibling, then rename.
///
/// The parent directory is created if absent. `BTreeSet` iteration keeps
/// the output sorted and deduplicated.
pub fn save(path: &Path, entries: &BTreeSet<String>) -> Result<(), CoreError> {
    let Some(dir) = path.parent() else {
        return Err(io_err(
            path,
            std::io::Error::other("list path has no parent"),
        ));
    };
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let mut contents = String::new();
    for entry in entries {
        contents.push_str(entry);
        contents.push('\n');
    }

    let tmp = tmp_path(path);
    std::fs::write(&tmp, &contents).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

/// `.tmp` sibling in the same directory (same filesystem — rename stays
/// atomic). List names may contain dots, so the suffix is appended to the
/// whole file name rather than swapped in as an extension.
fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.tmp"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
