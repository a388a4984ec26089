//! Branching undo/redo timeline over multi-file edit checkpoints.
//!
//! Each chat request that edits files pushes one or more *stops* (checkpoints
//! of every tracked file's content). The timeline keeps those stops in push
//! order, grouped by request, plus a cursor counting how many are active.
//! Hosts move the cursor with applyable [`Step`]s and restore file contents
//! from the step's snapshot.
//!
//! # Flow
//!
//! ```text
//! host edit step
//!       │
//!       ▼
//! Timeline::push_snapshot(request, stop, snapshot)   ← truncates undone future
//!       │
//!       ▼
//! Transaction commit → disablement::project() → TimelineEvent::Changed
//!
//! Timeline::undo_step() / redo_step() / snapshot_for_restore()
//!       │
//!       ▼
//! Step::apply(&mut timeline) → host restores step.stop().snapshot
//! ```
//!
//! # Invariants
//!
//! - `0 <= index <= stop_count`, and `index >= 1` once any stop exists
//! - a request's stops are contiguous and no request entry is empty
//! - right after a push, `index == stop_count`
//! - observers see exactly one consistent update per transaction

mod config;
mod disablement;
mod error;
mod event;
mod step;
mod timeline;
mod transaction;

pub use config::{ConfigError, RestorePolicy, TimelineConfig};
pub use disablement::{RequestDisablement, project as project_disablement};
pub use error::TimelineError;
pub use event::{TimelineEvent, TimelineStatus};
pub use step::{Step, StepKind};
pub use timeline::Timeline;
pub use transaction::Transaction;

pub use edit_timeline_types::{
    FileUri, POST_EDIT_STOP_ID, PersistedState, RequestEntry, RequestId, Snapshot, SnapshotEntry,
    StateError, Stop, StopId, TimelineId,
};

/// Result type for timeline operations.
pub type Result<T> = std::result::Result<T, TimelineError>;
