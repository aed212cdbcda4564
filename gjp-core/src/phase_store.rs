//! Phase marker storage.
//!
//! The active phase is persisted as a single marker file at the project
//! root, named after the phase. [`PhaseStore`] abstracts the storage so the
//! state machine can be exercised against an in-memory store in tests.

use std::cell::Cell;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{io_err, CoreError};
use crate::types::Phase;

/// Read/write/clear access to the persisted phase.
///
/// Implementations must uphold the single-marker invariant: after any call,
/// at most one phase is recorded.
pub trait PhaseStore {
    /// Current phase, re-read from the underlying storage on every call.
    fn read(&self) -> Result<Option<Phase>, CoreError>;
    /// Record `phase`, replacing any previously recorded phase.
    fn write(&self, phase: Phase) -> Result<(), CoreError>;
    /// Remove any recorded phase.
    fn clear(&self) -> Result<(), CoreError>;
}

// ---------------------------------------------------------------------------
// MarkerStore — filesystem markers at the project root
// ---------------------------------------------------------------------------

/// Marker-file store rooted at a project directory.
#[derive(Debug, Clone)]
pub struct MarkerStore {
    root: PathBuf,
}

impl MarkerStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the marker file for `phase`.
    pub fn marker_path(&self, phase: Phase) -> PathBuf {
        self.root.join(phase.marker_name())
    }

    fn remove_marker(&self, phase: Phase) -> Result<(), CoreError> {
        let path = self.marker_path(phase);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(path, e)),
        }
    }
}

impl PhaseStore for MarkerStore {
    fn read(&self) -> Result<Option<Phase>, CoreError> {
        let gathering = self.marker_path(Phase::Gathering).exists();
        let dry_running = self.marker_path(Phase::DryRunning).exists();
        match (gathering, dry_running) {
            (true, true) => Err(CoreError::ConflictingMarkers {
                root: self.root.clone(),
            }),
            (true, false) => Ok(Some(Phase::Gathering)),
            (false, true) => Ok(Some(Phase::DryRunning)),
            (false, false) => Ok(None),
        }
    }

    fn write(&self, phase: Phase) -> Result<(), CoreError> {
        for other in Phase::ALL {
            if other != phase {
                self.remove_marker(other)?;
            }
        }
        let path = self.marker_path(phase);
        std::fs::write(&path, b"").map_err(|e| io_err(path, e))
    }

    fn clear(&self) -> Result<(), CoreError> {
        for phase in Phase::ALL {
            self.remove_marker(phase)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore — for state-machine tests
// ---------------------------------------------------------------------------

/// In-memory store; substitutes for [`MarkerStore`] in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    phase: Cell<Option<Phase>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhaseStore for MemoryStore {
    fn read(&self) -> Result<Option<Phase>, CoreError> {
        Ok(self.phase.get())
    }

    fn write(&self, phase: Phase) -> Result<(), CoreError> {
        self.phase.set(Some(phase));
        Ok(())
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.phase.set(None);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
