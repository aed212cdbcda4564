//! Snapshot & tag ledger.
//!
//! Every phase transition commits the whole working tree; some commits are
//! additionally labelled with a tag `gjp_<tag_type>_<n>`. Counters are
//! per tag-type, strictly increasing, and never reused — tags form an
//! append-only ledger from which phase history can be reconstructed.

use gjp_core::types::TagType;

use crate::error::VcsError;
use crate::git::Git;

/// Common prefix of every gjp tag.
pub const TAG_PREFIX: &str = "gjp_";

/// `gjp_<tag_type>_<counter>`. Counter 0 is the "no such tag yet"
/// sentinel — it never names an existing tag.
pub fn tag_name(tag_type: TagType, counter: u64) -> String {
    format!("{TAG_PREFIX}{}_{counter}", tag_type.as_str())
}

fn parse_counter(tag: &str, tag_type: TagType) -> Option<u64> {
    tag.strip_prefix(TAG_PREFIX)?
        .strip_prefix(tag_type.as_str())?
        .strip_prefix('_')?
        .parse()
        .ok()
}

/// Commit/tag/diff/revert operations for one repository.
#[derive(Debug, Clone)]
pub struct SnapshotLedger {
    git: Git,
}

impl SnapshotLedger {
    pub fn new(git: Git) -> Self {
        Self { git }
    }

    pub fn git(&self) -> &Git {
        &self.git
    }

    /// Stage and commit the entire working tree (including deletions) with
    /// `message`. With a tag type, additionally tag the commit with the
    /// next counter for that type; the created tag name is returned.
    pub fn take_snapshot(
        &self,
        message: &str,
        tag_type: Option<TagType>,
    ) -> Result<Option<String>, VcsError> {
        self.git.commit_all(message)?;
        match tag_type {
            Some(tag_type) => {
                let counter = self.latest_tag_count(tag_type)? + 1;
                let name = tag_name(tag_type, counter);
                self.git.tag(&name)?;
                tracing::info!("snapshot '{message}' tagged {name}");
                Ok(Some(name))
            }
            None => {
                tracing::debug!("snapshot '{message}'");
                Ok(None)
            }
        }
    }

    /// Highest existing counter for `tag_type`, or 0 if no tag of that
    /// type exists yet.
    pub fn latest_tag_count(&self, tag_type: TagType) -> Result<u64, VcsError> {
        let tags = self.git.tags()?;
        Ok(tags
            .iter()
            .filter_map(|tag| parse_counter(tag, tag_type))
            .max()
            .unwrap_or(0))
    }

    /// Name of the newest tag of `tag_type`. Resolves to the `_0` sentinel
    /// when no such tag exists; callers must treat that as "no prior
    /// snapshot".
    pub fn latest_tag(&self, tag_type: TagType) -> Result<String, VcsError> {
        Ok(tag_name(tag_type, self.latest_tag_count(tag_type)?))
    }

    fn latest_existing_tag(&self, tag_type: TagType) -> Result<Option<String>, VcsError> {
        let counter = self.latest_tag_count(tag_type)?;
        Ok((counter > 0).then(|| tag_name(tag_type, counter)))
    }

    /// Paths changed between the newest `tag_type` snapshot and `HEAD`,
    /// relative to the repository root. With no such tag, the diff runs
    /// against the empty tree, so every tracked path reads as new.
    pub fn changed_since(&self, tag_type: TagType) -> Result<Vec<String>, VcsError> {
        let from = match self.latest_existing_tag(tag_type)? {
            Some(tag) => tag,
            None => Git::EMPTY_TREE.to_string(),
        };
        self.git.changed_paths(&from, "HEAD")
    }

    /// Restore `path` to its content at the newest `tag_type` snapshot:
    /// drop worktree and index state under `path`, check the snapshot's
    /// content back out, then delete untracked leftovers.
    ///
    /// Against the `_0` sentinel there is no recorded content; the subtree
    /// is cleared. Failures surface to the caller — the subtree state is
    /// unspecified after an error.
    pub fn revert(&self, path: &str, tag_type: TagType) -> Result<(), VcsError> {
        let tag = self.latest_existing_tag(tag_type)?;
        self.git.remove_force(path)?;
        if let Some(tag) = &tag {
            self.git.checkout_force(tag, path)?;
        }
        self.git.clean(path)?;
        tracing::info!(
            "reverted '{path}' to {}",
            tag.as_deref().unwrap_or("empty tree")
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn init_repo() -> (TempDir, SnapshotLedger) {
        let tmp = TempDir::new().expect("tempdir");
        let git = Git::init(tmp.path()).expect("init");
        git.config_set("user.name", "gjp tests").expect("user.name");
        git.config_set("user.email", "gjp@example.invalid")
            .expect("user.email");
        (tmp, SnapshotLedger::new(git))
    }

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write");
    }

    #[test]
    fn counter_zero_when_no_tags() {
        let (_tmp, ledger) = init_repo();
        ledger.take_snapshot("initial", None).expect("snapshot");
        assert_eq!(
            ledger
                .latest_tag_count(TagType::GatheringStarted)
                .expect("count"),
            0
        );
        assert_eq!(
            ledger.latest_tag(TagType::GatheringStarted).expect("tag"),
            "gjp_gathering_started_0"
        );
    }

    #[test]
    fn tagged_snapshots_increment_per_type() {
        let (_tmp, ledger) = init_repo();
        let first = ledger
            .take_snapshot("start", Some(TagType::GatheringStarted))
            .expect("snapshot");
        assert_eq!(first.as_deref(), Some("gjp_gathering_started_1"));

        let second = ledger
            .take_snapshot("start again", Some(TagType::GatheringStarted))
            .expect("snapshot");
        assert_eq!(second.as_deref(), Some("gjp_gathering_started_2"));

        // Independent counter per type.
        let other = ledger
            .take_snapshot("finish", Some(TagType::GatheringFinished))
            .expect("snapshot");
        assert_eq!(other.as_deref(), Some("gjp_gathering_finished_1"));
    }

    #[test]
    fn untagged_snapshot_creates_no_tag() {
        let (_tmp, ledger) = init_repo();
        let tag = ledger.take_snapshot("plain", None).expect("snapshot");
        assert_eq!(tag, None);
        assert!(ledger.git().tags().expect("tags").is_empty());
    }

    #[test]
    fn foreign_tags_do_not_disturb_counters() {
        let (_tmp, ledger) = init_repo();
        ledger.take_snapshot("initial", None).expect("snapshot");
        ledger.git().tag("v1.0").expect("tag");
        ledger.git().tag("gjp_gathering_started_notanumber").expect("tag");
        ledger
            .git()
            .tag("gjp_gathering_started_extra_7")
            .expect("tag");

        assert_eq!(
            ledger
                .latest_tag_count(TagType::GatheringStarted)
                .expect("count"),
            0
        );
    }

    #[test]
    fn changed_since_missing_tag_reads_everything_as_new() {
        let (tmp, ledger) = init_repo();
        write(tmp.path(), "src/foo/A.java", "class A {}");
        ledger.take_snapshot("add A", None).expect("snapshot");

        let changed = ledger
            .changed_since(TagType::GatheringStarted)
            .expect("diff");
        assert_eq!(changed, vec!["src/foo/A.java"]);
    }

    #[test]
    fn changed_since_tag_sees_only_later_changes() {
        let (tmp, ledger) = init_repo();
        write(tmp.path(), "src/foo/A.java", "class A {}");
        ledger
            .take_snapshot("start", Some(TagType::GatheringStarted))
            .expect("snapshot");

        write(tmp.path(), "src/foo/B.java", "class B {}");
        ledger.take_snapshot("add B", None).expect("snapshot");

        let changed = ledger
            .changed_since(TagType::GatheringStarted)
            .expect("diff");
        assert_eq!(changed, vec!["src/foo/B.java"]);
    }

    #[test]
    fn revert_restores_edits_and_removes_additions() {
        let (tmp, ledger) = init_repo();
        write(tmp.path(), "src/foo/A.java", "original");
        write(tmp.path(), "kit/lib.jar", "jar v1");
        ledger
            .take_snapshot("start dry run", Some(TagType::DryRunStarted))
            .expect("snapshot");

        write(tmp.path(), "src/foo/A.java", "mutated by build");
        write(tmp.path(), "src/foo/B.java", "generated");
        write(tmp.path(), "kit/lib.jar", "jar v2");
        ledger.take_snapshot("during dry run", None).expect("snapshot");

        ledger.revert("src", TagType::DryRunStarted).expect("revert");

        let a = fs::read_to_string(tmp.path().join("src/foo/A.java")).expect("read A");
        assert_eq!(a, "original");
        assert!(
            !tmp.path().join("src/foo/B.java").exists(),
            "files added during the phase must be gone"
        );
        // Only the named subtree is touched.
        let jar = fs::read_to_string(tmp.path().join("kit/lib.jar")).expect("read jar");
        assert_eq!(jar, "jar v2");
    }

    #[test]
    fn revert_also_drops_untracked_files() {
        let (tmp, ledger) = init_repo();
        write(tmp.path(), "src/foo/A.java", "original");
        ledger
            .take_snapshot("start", Some(TagType::DryRunStarted))
            .expect("snapshot");

        // Never committed — simulates build scratch output.
        write(tmp.path(), "src/foo/scratch.tmp", "scratch");

        ledger.revert("src", TagType::DryRunStarted).expect("revert");
        assert!(!tmp.path().join("src/foo/scratch.tmp").exists());
        assert!(tmp.path().join("src/foo/A.java").exists());
    }

    #[test]
    fn revert_against_sentinel_clears_subtree() {
        let (tmp, ledger) = init_repo();
        write(tmp.path(), "src/foo/A.java", "content");
        ledger.take_snapshot("add", None).expect("snapshot");

        ledger.revert("src", TagType::DryRunStarted).expect("revert");
        assert!(!tmp.path().join("src/foo/A.java").exists());
    }
}
