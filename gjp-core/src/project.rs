//! Project-root resolution.
//!
//! A gjp project root is a directory holding three markers of validity: a
//! `src/` subtree, a `kit/` subtree and a `.git/` metadata entry. Roots are
//! resolved by walking upward from a starting path, so any descendant of a
//! valid root resolves to that root.

use std::path::{Path, PathBuf};

use crate::error::{io_err, CoreError};

/// Directory name of the Java source subtree.
pub const SRC_DIR: &str = "src";
/// Directory name of the kit (jars, resources) subtree.
pub const KIT_DIR: &str = "kit";
/// Directory holding one changed-file list per tracked subtree.
pub const FILE_LISTS_DIR: &str = "file_lists";

/// A resolved gjp project.
///
/// Owns its absolute root path and is otherwise stateless — all mutable
/// state lives on disk and is re-read on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Resolve a project by walking upward from `start` until a directory
    /// passes the structural check.
    ///
    /// Returns [`CoreError::InvalidProject`] when the filesystem root is
    /// reached without a match.
    pub fn locate(start: impl AsRef<Path>) -> Result<Project, CoreError> {
        let start = start.as_ref();
        let absolute = start.canonicalize().map_err(|e| io_err(start, e))?;
        for dir in absolute.ancestors() {
            if is_project_root(dir) {
                return Ok(Project {
                    root: dir.to_path_buf(),
                });
            }
        }
        Err(CoreError::InvalidProject {
            start: start.to_path_buf(),
        })
    }

    /// Wrap an already-known project root without walking upward.
    ///
    /// Applies the same structural check as [`Project::locate`] but only to
    /// `root` itself.
    pub fn open(root: impl AsRef<Path>) -> Result<Project, CoreError> {
        let root = root.as_ref();
        let absolute = root.canonicalize().map_err(|e| io_err(root, e))?;
        if !is_project_root(&absolute) {
            return Err(CoreError::InvalidProject {
                start: root.to_path_buf(),
            });
        }
        Ok(Project { root: absolute })
    }

    /// Absolute project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/src`
    pub fn src_dir(&self) -> PathBuf {
        self.root.join(SRC_DIR)
    }

    /// `<root>/kit`
    pub fn kit_dir(&self) -> PathBuf {
        self.root.join(KIT_DIR)
    }

    /// `<root>/file_lists`
    pub fn file_lists_dir(&self) -> PathBuf {
        self.root.join(FILE_LISTS_DIR)
    }

    /// Immediate subdirectories of `src/`, sorted by name.
    ///
    /// Each one is an independent source package with its own changed-file
    /// list.
    pub fn src_packages(&self) -> Result<Vec<String>, CoreError> {
        let src = self.src_dir();
        let entries = std::fs::read_dir(&src).map_err(|e| io_err(&src, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&src, e))?;
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// `.git` may be a directory or a worktree link file; `src/` and `kit/`
/// must be directories.
fn is_project_root(dir: &Path) -> bool {
    dir.join(SRC_DIR).is_dir() && dir.join(KIT_DIR).is_dir() && dir.join(".git").exists()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
