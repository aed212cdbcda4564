//! # gjp-phases
//!
//! The phase state machine and its snapshot/diff/revert side effects.
//!
//! Call [`PhaseMachine::gather`] / [`PhaseMachine::dry_run`] to enter a
//! phase and [`PhaseMachine::finish`] to close it; [`scaffold`] seeds a
//! fresh project.

pub mod error;
pub mod machine;
pub mod scaffold;
pub mod tracker;

pub use error::PhaseError;
pub use machine::{PhaseMachine, StartOutcome};
