//! Domain types for gjp.
//!
//! All path fields elsewhere in the workspace use `PathBuf`; the types here
//! are the plain vocabulary shared by every crate.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The editing phase a project is currently in.
///
/// "No phase active" is modelled as `Option<Phase>`; there is no variant for
/// it here. On disk a phase is a single marker file at the project root,
/// named after [`Phase::marker_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Collecting upstream source and kit material.
    Gathering,
    /// Simulating a build that must leave sources unmodified.
    DryRunning,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Phase::Gathering, Phase::DryRunning];

    /// File name of the on-disk phase marker.
    pub fn marker_name(self) -> &'static str {
        match self {
            Phase::Gathering => "gathering",
            Phase::DryRunning => "dry_running",
        }
    }

    /// Tag type recorded when this phase starts.
    pub fn started_tag(self) -> TagType {
        match self {
            Phase::Gathering => TagType::GatheringStarted,
            Phase::DryRunning => TagType::DryRunStarted,
        }
    }

    /// Tag type recorded when this phase is closed.
    pub fn finished_tag(self) -> TagType {
        match self {
            Phase::Gathering => TagType::GatheringFinished,
            Phase::DryRunning => TagType::DryRunFinished,
        }
    }

    /// Suffix of the changed-file lists written when this phase closes.
    ///
    /// Gathering collects build inputs; dry-running observes build outputs.
    pub fn list_suffix(self) -> &'static str {
        match self {
            Phase::Gathering => "input",
            Phase::DryRunning => "output",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Gathering => write!(f, "gathering"),
            Phase::DryRunning => write!(f, "dry-running"),
        }
    }
}

// ---------------------------------------------------------------------------
// TagType
// ---------------------------------------------------------------------------

/// Semantic event a snapshot tag records.
///
/// Tags are named `gjp_<tag_type>_<n>` where `n` is a per-type counter,
/// strictly increasing across the project's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagType {
    GatheringStarted,
    GatheringFinished,
    DryRunStarted,
    DryRunFinished,
}

impl TagType {
    pub const ALL: [TagType; 4] = [
        TagType::GatheringStarted,
        TagType::GatheringFinished,
        TagType::DryRunStarted,
        TagType::DryRunFinished,
    ];

    /// Middle segment of a `gjp_<tag_type>_<n>` tag name.
    pub fn as_str(self) -> &'static str {
        match self {
            TagType::GatheringStarted => "gathering_started",
            TagType::GatheringFinished => "gathering_finished",
            TagType::DryRunStarted => "dry_run_started",
            TagType::DryRunFinished => "dry_run_finished",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
