//! gjp core library — domain types, project resolution, phase storage.
//!
//! Public API surface:
//! - [`types`] — [`Phase`] and [`TagType`]
//! - [`error`] — [`CoreError`]
//! - [`project`] — root resolution and layout accessors
//! - [`phase_store`] — marker-file phase persistence behind [`PhaseStore`]
//! - [`lease`] — exclusivity seam (no-op by default)
//! - [`file_list`] — changed-file-list persistence

pub mod error;
pub mod file_list;
pub mod lease;
pub mod phase_store;
pub mod project;
pub mod types;

pub use error::CoreError;
pub use lease::{Lease, NoopLease};
pub use phase_store::{MarkerStore, MemoryStore, PhaseStore};
pub use project::Project;
pub use types::{Phase, TagType};
