//! # gjp-vcs
//!
//! Process execution facade, git adapter and snapshot & tag ledger.
//!
//! Everything here is synchronous and blocking: a command runs to
//! completion or the whole operation fails. Call
//! [`SnapshotLedger::take_snapshot`] to commit the working tree (optionally
//! tagged), or [`SnapshotLedger::revert`] to restore a subtree to a prior
//! snapshot.

pub mod error;
pub mod exec;
pub mod git;
pub mod ledger;

pub use error::VcsError;
pub use exec::{CommandLine, Output};
pub use git::Git;
pub use ledger::{tag_name, SnapshotLedger, TAG_PREFIX};
