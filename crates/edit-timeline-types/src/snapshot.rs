//! File-content snapshots.
//!
//! A `Snapshot` is the complete tracked-file state at one checkpoint: each
//! file uri maps to the content captured for it and the request that owns that
//! content. The timeline stores and hands these back; it never inspects the
//! content itself.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{FileUri, RequestId};

/// Captured state of one file at one checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    /// The request whose edits produced this content.
    pub request_id: RequestId,
    /// Full file text.
    pub content: String,
}

impl SnapshotEntry {
    pub fn new(request_id: impl Into<RequestId>, content: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            content: content.into(),
        }
    }
}

/// Mapping from file uri to captured entry.
///
/// Ordered by uri so persisted output is deterministic; callers should not
/// rely on the order for meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<FileUri, SnapshotEntry>,
}

impl Snapshot {
    /// An empty snapshot (no tracked files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_entry(mut self, uri: impl Into<FileUri>, entry: SnapshotEntry) -> Self {
        self.entries.insert(uri.into(), entry);
        self
    }

    /// Insert or replace the entry for `uri`, returning the previous one.
    pub fn insert(&mut self, uri: impl Into<FileUri>, entry: SnapshotEntry) -> Option<SnapshotEntry> {
        self.entries.insert(uri.into(), entry)
    }

    pub fn get(&self, uri: &FileUri) -> Option<&SnapshotEntry> {
        self.entries.get(uri)
    }

    pub fn contains(&self, uri: &FileUri) -> bool {
        self.entries.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(uri, entry)` pairs in uri order.
    pub fn iter(&self) -> impl Iterator<Item = (&FileUri, &SnapshotEntry)> {
        self.entries.iter()
    }

    /// Tracked file uris in uri order.
    pub fn uris(&self) -> impl Iterator<Item = &FileUri> {
        self.entries.keys()
    }
}

impl FromIterator<(FileUri, SnapshotEntry)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (FileUri, SnapshotEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
