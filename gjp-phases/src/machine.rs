//! Phase state machine.
//!
//! Transitions:
//! - `gather`:  none → gathering; dry-running → (close dry run) → gathering;
//!   gathering → reported no-op
//! - `dry_run`: symmetric
//! - `finish`:  closes the active phase, or reports that none was active
//!
//! Every transition that changes on-disk phase state writes the marker
//! first and commits the snapshot after, so the committed snapshot always
//! captures the marker state and phase history is reconstructable from
//! tags alone. Any git failure aborts the transition and surfaces to the
//! caller; there are no retries.

use gjp_core::{
    lease::{Lease, NoopLease},
    phase_store::{MarkerStore, PhaseStore},
    project::{Project, KIT_DIR, SRC_DIR},
    types::Phase,
};
use gjp_vcs::{Git, SnapshotLedger};

use crate::error::PhaseError;
use crate::tracker;

/// Outcome of [`PhaseMachine::gather`] / [`PhaseMachine::dry_run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The phase was started and a tagged snapshot taken.
    Started,
    /// The project was already in the requested phase; nothing happened
    /// and no new tag exists.
    AlreadyActive,
}

/// The phase state machine for one project.
///
/// Store and lease are injectable; [`PhaseMachine::for_project`] wires the
/// defaults (marker files at the project root, no-op lease).
pub struct PhaseMachine<S: PhaseStore = MarkerStore, L: Lease = NoopLease> {
    project: Project,
    ledger: SnapshotLedger,
    store: S,
    lease: L,
}

impl PhaseMachine<MarkerStore, NoopLease> {
    pub fn for_project(project: Project) -> Self {
        let ledger = SnapshotLedger::new(Git::open(project.root()));
        let store = MarkerStore::new(project.root());
        Self::new(project, ledger, store, NoopLease)
    }
}

impl<S: PhaseStore, L: Lease> PhaseMachine<S, L> {
    pub fn new(project: Project, ledger: SnapshotLedger, store: S, lease: L) -> Self {
        Self {
            project,
            ledger,
            store,
            lease,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn ledger(&self) -> &SnapshotLedger {
        &self.ledger
    }

    /// Current phase, read fresh from the store.
    pub fn current_phase(&self) -> Result<Option<Phase>, PhaseError> {
        Ok(self.store.read()?)
    }

    /// Enter the gathering phase.
    ///
    /// Already gathering: reported no-op. Dry-running: the dry run is
    /// closed first (full finish side effects), then gathering starts.
    pub fn gather(&self) -> Result<StartOutcome, PhaseError> {
        self.with_lease(|machine| machine.start(Phase::Gathering))
    }

    /// Enter the dry-running phase; symmetric to [`PhaseMachine::gather`].
    pub fn dry_run(&self) -> Result<StartOutcome, PhaseError> {
        self.with_lease(|machine| machine.start(Phase::DryRunning))
    }

    /// Close the active phase.
    ///
    /// Returns the phase that was closed, or `None` when no phase was
    /// active (a reported no-op — no snapshot is taken).
    pub fn finish(&self) -> Result<Option<Phase>, PhaseError> {
        self.with_lease(|machine| match machine.store.read()? {
            Some(phase) => {
                machine.close(phase)?;
                Ok(Some(phase))
            }
            None => Ok(None),
        })
    }

    fn with_lease<T>(
        &self,
        operation: impl FnOnce(&Self) -> Result<T, PhaseError>,
    ) -> Result<T, PhaseError> {
        self.lease.acquire()?;
        let result = operation(self);
        self.lease.release();
        result
    }

    fn start(&self, phase: Phase) -> Result<StartOutcome, PhaseError> {
        match self.store.read()? {
            Some(active) if active == phase => {
                tracing::info!("{phase} already active");
                return Ok(StartOutcome::AlreadyActive);
            }
            // Switching phases closes the active one first.
            Some(active) => self.close(active)?,
            None => {}
        }

        // Marker before snapshot: the tagged commit must capture it.
        self.store.write(phase)?;
        self.ledger
            .take_snapshot(&format!("gjp: {phase} started"), Some(phase.started_tag()))?;
        tracing::info!("{phase} started");
        Ok(StartOutcome::Started)
    }

    /// Full closing sequence for `phase`:
    /// capture-changes snapshot, changed-file list updates against the
    /// phase-start tag, record-lists snapshot, source revert (dry run
    /// only), marker clear, tagged finished snapshot.
    fn close(&self, phase: Phase) -> Result<(), PhaseError> {
        let since = phase.started_tag();
        let suffix = phase.list_suffix();

        self.ledger
            .take_snapshot(&format!("gjp: capture {phase} changes"), None)?;

        let kit_list = format!("{KIT_DIR}_{suffix}");
        tracker::update_changed_file_list(&self.ledger, &self.project, KIT_DIR, &kit_list, since)?;
        tracker::update_changed_src_file_lists(&self.ledger, &self.project, suffix, since)?;
        self.ledger
            .take_snapshot(&format!("gjp: record {phase} file lists"), None)?;

        if phase == Phase::DryRunning {
            // A dry run must leave sources untouched; kit changes and the
            // file lists persist.
            self.ledger.revert(SRC_DIR, since)?;
            self.ledger
                .take_snapshot("gjp: revert sources after dry run", None)?;
        }

        self.store.clear()?;
        self.ledger
            .take_snapshot(&format!("gjp: {phase} finished"), Some(phase.finished_tag()))?;
        tracing::info!("{phase} finished");
        Ok(())
    }
}
