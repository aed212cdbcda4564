//! Typed git command templates over the execution facade.
//!
//! Each method maps to exactly one git invocation; no porcelain output is
//! interpreted here beyond splitting lines. Higher-level semantics (tag
//! counters, revert sequencing) live in [`crate::ledger`].

use std::path::{Path, PathBuf};

use crate::error::VcsError;
use crate::exec::CommandLine;

/// A git repository rooted at a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    root: PathBuf,
}

impl Git {
    /// git's well-known empty tree object. Diffing against it makes every
    /// tracked path read as added.
    pub const EMPTY_TREE: &'static str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

    /// Wrap an existing repository. No validation is performed; the first
    /// command will fail if `root` is not a repository.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `git init` a fresh repository at `root`.
    pub fn init(root: impl Into<PathBuf>) -> Result<Git, VcsError> {
        let git = Git::open(root);
        git.command(["init", "--quiet"]).run()?;
        Ok(git)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn command<'a>(&self, args: impl IntoIterator<Item = &'a str>) -> CommandLine {
        CommandLine::new("git")
            .args(args)
            .current_dir(&self.root)
    }

    /// `git add -A` — stage everything, including deletions.
    pub fn add_all(&self) -> Result<(), VcsError> {
        self.command(["add", "-A"]).run()?;
        Ok(())
    }

    /// Stage the whole working tree and commit it.
    ///
    /// `--allow-empty` keeps the snapshot contract even when nothing
    /// changed since the previous commit.
    pub fn commit_all(&self, message: &str) -> Result<(), VcsError> {
        self.add_all()?;
        self.command(["commit", "--quiet", "--allow-empty", "-m", message])
            .run()?;
        Ok(())
    }

    /// Create a lightweight tag pointing at `HEAD`.
    pub fn tag(&self, name: &str) -> Result<(), VcsError> {
        self.command(["tag", name]).run()?;
        Ok(())
    }

    /// All tag names in the repository.
    pub fn tags(&self) -> Result<Vec<String>, VcsError> {
        let output = self.command(["tag", "--list"]).run()?;
        Ok(output.stdout_lines().map(str::to_owned).collect())
    }

    /// Paths that differ between two revisions
    /// (`git diff-tree -r --name-only --no-commit-id <from> <to>`),
    /// relative to the repository root.
    pub fn changed_paths(&self, from: &str, to: &str) -> Result<Vec<String>, VcsError> {
        let output = self
            .command(["diff-tree", "-r", "--name-only", "--no-commit-id", from, to])
            .run()?;
        Ok(output.stdout_lines().map(str::to_owned).collect())
    }

    /// Restore `path` (worktree and index) to its content at `rev`.
    pub fn checkout_force(&self, rev: &str, path: &str) -> Result<(), VcsError> {
        self.command(["checkout", "--force", rev, "--", path]).run()?;
        Ok(())
    }

    /// Remove `path` from the worktree and index, tolerating paths with no
    /// tracked match.
    pub fn remove_force(&self, path: &str) -> Result<(), VcsError> {
        self.command(["rm", "-r", "-f", "-q", "--ignore-unmatch", "--", path])
            .run()?;
        Ok(())
    }

    /// Delete untracked files and directories under `path`.
    pub fn clean(&self, path: &str) -> Result<(), VcsError> {
        self.command(["clean", "-f", "-d", "-q", "--", path]).run()?;
        Ok(())
    }

    /// Probe a config key. Absent keys are not an error — this is the
    /// sanctioned use of the facade's non-fatal mode.
    pub fn config_get(&self, key: &str) -> Result<Option<String>, VcsError> {
        let output = self.command(["config", "--get", key]).run_unchecked()?;
        if !output.success() {
            return Ok(None);
        }
        let value = output.stdout.trim();
        Ok((!value.is_empty()).then(|| value.to_owned()))
    }

    /// Set a repo-local config key.
    pub fn config_set(&self, key: &str, value: &str) -> Result<(), VcsError> {
        self.command(["config", key, value]).run()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn init_repo() -> (TempDir, Git) {
        let tmp = TempDir::new().expect("tempdir");
        let git = Git::init(tmp.path()).expect("init");
        git.config_set("user.name", "gjp tests").expect("user.name");
        git.config_set("user.email", "gjp@example.invalid")
            .expect("user.email");
        (tmp, git)
    }

    #[test]
    fn commit_all_allows_empty_tree() {
        let (_tmp, git) = init_repo();
        git.commit_all("empty snapshot").expect("commit");
        git.commit_all("another empty snapshot").expect("commit");
    }

    #[test]
    fn tags_empty_on_fresh_repo() {
        let (_tmp, git) = init_repo();
        git.commit_all("initial").expect("commit");
        assert!(git.tags().expect("tags").is_empty());
    }

    #[test]
    fn tag_then_list_roundtrip() {
        let (_tmp, git) = init_repo();
        git.commit_all("initial").expect("commit");
        git.tag("gjp_gathering_started_1").expect("tag");
        assert_eq!(git.tags().expect("tags"), vec!["gjp_gathering_started_1"]);
    }

    #[test]
    fn changed_paths_against_empty_tree_lists_everything() {
        let (tmp, git) = init_repo();
        fs::create_dir_all(tmp.path().join("src/foo")).expect("mkdir");
        fs::write(tmp.path().join("src/foo/A.java"), "class A {}").expect("write");
        git.commit_all("add A").expect("commit");

        let paths = git.changed_paths(Git::EMPTY_TREE, "HEAD").expect("diff");
        assert_eq!(paths, vec!["src/foo/A.java"]);
    }

    #[test]
    fn changed_paths_between_commits() {
        let (tmp, git) = init_repo();
        fs::write(tmp.path().join("stable"), "same").expect("write");
        fs::write(tmp.path().join("volatile"), "v1").expect("write");
        git.commit_all("first").expect("commit");
        git.tag("before").expect("tag");

        fs::write(tmp.path().join("volatile"), "v2").expect("write");
        fs::write(tmp.path().join("added"), "new").expect("write");
        git.commit_all("second").expect("commit");

        let mut paths = git.changed_paths("before", "HEAD").expect("diff");
        paths.sort();
        assert_eq!(paths, vec!["added", "volatile"]);
    }

    #[test]
    fn config_probe_absent_key_is_none() {
        let (_tmp, git) = init_repo();
        let value = git.config_get("gjp.no-such-key").expect("probe");
        assert_eq!(value, None);
    }

    #[test]
    fn config_roundtrip() {
        let (_tmp, git) = init_repo();
        let value = git.config_get("user.email").expect("probe");
        assert_eq!(value.as_deref(), Some("gjp@example.invalid"));
    }
}
