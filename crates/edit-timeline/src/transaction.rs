//! Transaction scope — batched, atomic writes to a timeline.
//!
//! All mutation goes through a [`Transaction`]. Writes land immediately, but
//! derived state (disablement) is recomputed and the change feed fires only
//! when the transaction is dropped or committed. Observers therefore see one
//! consistent update per transaction, never a half-applied restore.
//!
//! The convenience methods on `Timeline` each open and commit a transaction of
//! their own.

use edit_timeline_types::{FileUri, PersistedState, RequestEntry, RequestId, Snapshot, SnapshotEntry, Stop, StopId};

use crate::config::RestorePolicy;
use crate::error::TimelineError;
use crate::timeline::Timeline;
use crate::Result;

/// An open write scope over a [`Timeline`].
///
/// Derived views read through [`Transaction::timeline`] (disablement) reflect
/// the state as of the last commit until this transaction ends; the cursor,
/// history, and `can_undo`/`can_redo` are always current.
pub struct Transaction<'a> {
    timeline: &'a mut Timeline,
    changed: bool,
    restored: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(timeline: &'a mut Timeline) -> Self {
        Self {
            timeline,
            changed: false,
            restored: false,
        }
    }

    /// Read access to the timeline mid-transaction.
    pub fn timeline(&self) -> &Timeline {
        &*self.timeline
    }

    /// End the transaction now, publishing any changes.
    pub fn commit(self) {}

    fn touch(&mut self) {
        self.changed = true;
        self.timeline.generation += 1;
    }

    /// Append a stop, discarding any undone future first.
    pub fn push_snapshot(&mut self, request_id: RequestId, stop_id: StopId, snapshot: Snapshot) {
        let tl = &mut *self.timeline;
        let len = tl.stop_count();
        if tl.index < len {
            let discarded = truncate_history(&mut tl.history, tl.index);
            tracing::debug!(index = tl.index, discarded, "discarded undone stops before push");
        }

        let stop = Stop::new(stop_id, snapshot);
        match tl.history.last_mut() {
            Some(tail) if tail.request_id == request_id => tail.stops.push(stop),
            _ => {
                let mut entry = RequestEntry::new(request_id);
                entry.stops.push(stop);
                tl.history.push(entry);
            }
        }

        tl.index = tl.stop_count();
        self.touch();
    }

    /// Replace history and cursor wholesale.
    ///
    /// State that breaks the timeline's invariants is rejected or repaired
    /// according to the configured [`RestorePolicy`]. On rejection nothing
    /// changes.
    pub fn restore_from_state(&mut self, state: PersistedState) -> Result<()> {
        let policy = self.timeline.config.restore_policy;
        let (history, index) = validate_state(state, policy)?;

        self.timeline.history = history;
        self.timeline.index = index;
        self.restored = true;
        self.touch();
        Ok(())
    }

    /// Replace the captured entry for `uri` inside an existing stop.
    ///
    /// Returns `false` (and changes nothing) when no such stop exists.
    pub fn amend_stop_entry(
        &mut self,
        request_id: &str,
        stop_id: &StopId,
        uri: FileUri,
        entry: SnapshotEntry,
    ) -> bool {
        let Some(stop) = self.timeline.find_stop_mut(request_id, stop_id) else {
            return false;
        };
        if stop.snapshot.get(&uri) == Some(&entry) {
            return true;
        }
        stop.snapshot.insert(uri, entry);
        self.touch();
        true
    }

    /// Move the cursor. Returns whether it moved.
    pub(crate) fn set_index(&mut self, index: usize) -> bool {
        let len = self.timeline.stop_count();
        let floor = usize::from(len > 0);
        if index < floor || index > len {
            tracing::warn!(index, len, "refusing to move cursor out of range");
            return false;
        }
        if index == self.timeline.index {
            return false;
        }
        self.timeline.index = index;
        self.touch();
        true
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.changed {
            self.timeline.publish(self.restored);
        }
    }
}

/// Keep the first `keep` stops of the flattened history, dropping any entry
/// left empty. Returns how many stops were discarded.
fn truncate_history(history: &mut Vec<RequestEntry>, keep: usize) -> usize {
    let mut remaining = keep;
    let mut discarded = 0;

    history.retain_mut(|entry| {
        if remaining == 0 {
            discarded += entry.stops.len();
            return false;
        }
        if entry.stops.len() > remaining {
            discarded += entry.stops.len() - remaining;
            entry.stops.truncate(remaining);
            remaining = 0;
        } else {
            remaining -= entry.stops.len();
        }
        true
    });

    discarded
}

fn validate_state(state: PersistedState, policy: RestorePolicy) -> Result<(Vec<RequestEntry>, usize)> {
    let PersistedState { mut history, index } = state;

    if let Some(empty) = history.iter().find(|e| e.stops.is_empty()) {
        match policy {
            RestorePolicy::Reject => {
                tracing::warn!(request_id = %empty.request_id, "rejecting restore: request has no stops");
                return Err(TimelineError::EmptyRequest(empty.request_id.clone()));
            }
            RestorePolicy::Clamp => {
                tracing::warn!(request_id = %empty.request_id, "dropping empty requests from restored state");
                history.retain(|e| !e.stops.is_empty());
            }
        }
    }

    let len: usize = history.iter().map(|e| e.stops.len()).sum();
    let floor = i64::from(len > 0);
    let ceiling = i64::try_from(len).unwrap_or(i64::MAX);

    if index < floor || index > ceiling {
        match policy {
            RestorePolicy::Reject => {
                tracing::warn!(index, len, "rejecting restore: cursor out of range");
                return Err(TimelineError::IndexOutOfRange { index, len });
            }
            RestorePolicy::Clamp => {
                tracing::warn!(index, len, "clamping restored cursor into range");
            }
        }
    }

    // In range here, or clamped under RestorePolicy::Clamp.
    let index = index.clamp(floor, ceiling) as usize;
    Ok((history, index))
}
