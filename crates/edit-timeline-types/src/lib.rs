//! Shared identity, stop, and snapshot types for the edit timeline.
//!
//! This crate is the vocabulary the engine and its hosts share: typed ids,
//! file snapshots, stops, per-request entries, and the persisted state shape.
//! It has **no internal dependencies** — a pure leaf crate.
//!
//! # Relationships
//!
//! ```text
//! PersistedState
//!     └── history: RequestEntry (RequestId) ← one chat turn that edited files
//!             └── stops: Stop (StopId)      ← Root | PostEdit | Named
//!                     └── Snapshot          ← FileUri → SnapshotEntry
//!                             └── SnapshotEntry { request_id, content }
//! ```
//!
//! # Key Types
//!
//! |--------------------|---------------------------------------------|
//! | Type               | Purpose                                     |
//! |--------------------|---------------------------------------------|
//! | [`TimelineId`]     | Which timeline instance                     |
//! | [`RequestId`]      | Which chat request                          |
//! | [`FileUri`]        | Which tracked file                          |
//! | [`StopId`]         | Which checkpoint within a request           |
//! | [`Snapshot`]       | Tracked-file state at one checkpoint        |
//! | [`Stop`]           | Stop id + snapshot                          |
//! | [`RequestEntry`]   | All stops of one request                    |
//! | [`PersistedState`] | History + cursor as written to storage      |
//! |--------------------|---------------------------------------------|

pub mod ids;
pub mod snapshot;
pub mod state;
pub mod stop;

pub use ids::{FileUri, RequestId, TimelineId};
pub use snapshot::{Snapshot, SnapshotEntry};
pub use state::{PersistedState, StateError};
pub use stop::{POST_EDIT_STOP_ID, RequestEntry, Stop, StopId};
