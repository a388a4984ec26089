//! Stops (checkpoints) and the per-request entries that group them.
//!
//! # Stop ids
//!
//! A stop id is one of three things, and they are not interchangeable:
//!
//! - [`StopId::Root`] — the checkpoint taken before a request's first edit.
//!   Has no id of its own; persisted as `null`.
//! - [`StopId::PostEdit`] — the checkpoint taken once a request's streamed
//!   edits have fully landed. Persisted as [`POST_EDIT_STOP_ID`].
//! - [`StopId::Named`] — an interior checkpoint with a host-supplied id.
//!
//! An empty string is a valid `Named` id to store, but lookups by empty id
//! never match (see `Timeline::snapshot_for_restore`).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ids::RequestId;
use crate::snapshot::Snapshot;

/// Wire value of [`StopId::PostEdit`].
pub const POST_EDIT_STOP_ID: &str = "d19944f6-f46c-4e17-911b-79a8e843c7c0";

/// Identity of a stop within its request.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum StopId {
    /// Request root (no id).
    Root,
    /// End of the request's edits.
    PostEdit,
    /// Host-named interior stop.
    Named(String),
}

impl StopId {
    /// Build a named stop id.
    pub fn named(s: impl Into<String>) -> Self {
        Self::Named(s.into())
    }

    /// Map a raw optional wire id onto the tagged form.
    pub fn from_wire(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Root,
            Some(POST_EDIT_STOP_ID) => Self::PostEdit,
            Some(s) => Self::Named(s.to_string()),
        }
    }

    /// The wire form: `None` for root, the sentinel for post-edit.
    pub fn as_wire(&self) -> Option<&str> {
        match self {
            Self::Root => None,
            Self::PostEdit => Some(POST_EDIT_STOP_ID),
            Self::Named(s) => Some(s),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

impl From<&str> for StopId {
    fn from(s: &str) -> Self {
        Self::from_wire(Some(s))
    }
}

impl From<Option<&str>> for StopId {
    fn from(raw: Option<&str>) -> Self {
        Self::from_wire(raw)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("<root>"),
            Self::PostEdit => f.write_str("<post-edit>"),
            Self::Named(s) => f.write_str(s),
        }
    }
}

impl Serialize for StopId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for StopId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_wire(raw.as_deref()))
    }
}

/// One checkpoint: a stop id and the full tracked-file state at that point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub stop_id: StopId,
    #[serde(rename = "entries")]
    pub snapshot: Snapshot,
}

impl Stop {
    pub fn new(stop_id: StopId, snapshot: Snapshot) -> Self {
        Self { stop_id, snapshot }
    }

    /// A stop with the given id and no tracked files.
    pub fn empty(stop_id: StopId) -> Self {
        Self::new(stop_id, Snapshot::new())
    }
}

/// All stops pushed for one request, in push order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEntry {
    pub request_id: RequestId,
    pub stops: Vec<Stop>,
}

impl RequestEntry {
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            stops: Vec::new(),
        }
    }

    /// Position of the stop with `stop_id` within this entry.
    pub fn position_of(&self, stop_id: &StopId) -> Option<usize> {
        self.stops.iter().position(|s| &s.stop_id == stop_id)
    }
}
