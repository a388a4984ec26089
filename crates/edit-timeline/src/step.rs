//! Applyable steps returned by undo, redo, and restore lookups.
//!
//! A step is a read-only view of the stop it moves to plus a single mutating
//! [`Step::apply`]. It records the timeline and generation it was created
//! against, so it turns into a harmless no-op once applied or once anything
//! else changes the timeline.

use edit_timeline_types::{RequestId, Stop, TimelineId};

use crate::timeline::Timeline;
use crate::transaction::Transaction;

/// Which lookup produced a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StepKind {
    Undo,
    Redo,
    Restore,
}

/// A pending cursor move to one stop.
#[derive(Clone, Debug)]
pub struct Step {
    kind: StepKind,
    request_id: RequestId,
    stop: Stop,
    /// Cursor value after applying (the target stop becomes the active one).
    target_index: usize,
    timeline_id: TimelineId,
    generation: u64,
    applied: bool,
}

impl Step {
    pub(crate) fn new(
        kind: StepKind,
        timeline: &Timeline,
        request_id: RequestId,
        stop: Stop,
        target_index: usize,
    ) -> Self {
        Self {
            kind,
            request_id,
            stop,
            target_index,
            timeline_id: timeline.id(),
            generation: timeline.generation(),
            applied: false,
        }
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// The stop this step moves to; its snapshot is what the host restores.
    pub fn stop(&self) -> &Stop {
        &self.stop
    }

    /// Request owning the target stop.
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn target_index(&self) -> usize {
        self.target_index
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Move the timeline's cursor to this step's stop.
    ///
    /// Returns `true` when the cursor moved. A second call, a call against
    /// another timeline, or a call after the timeline changed since this step
    /// was handed out returns `false` and changes nothing. A restore to the
    /// stop that is already active consumes the step and returns `false`.
    pub fn apply(&mut self, timeline: &mut Timeline) -> bool {
        let mut tx = timeline.transaction();
        self.apply_in(&mut tx)
    }

    /// [`Step::apply`] inside a caller-owned transaction.
    #[tracing::instrument(skip(self, tx), fields(kind = %self.kind, target = self.target_index), name = "timeline.step.apply")]
    pub fn apply_in(&mut self, tx: &mut Transaction<'_>) -> bool {
        if self.applied {
            tracing::debug!("step already applied");
            return false;
        }
        let timeline = tx.timeline();
        if timeline.id() != self.timeline_id {
            tracing::warn!(expected = %self.timeline_id, got = %timeline.id(), "step belongs to another timeline");
            return false;
        }
        if timeline.generation() != self.generation {
            tracing::debug!(
                created_at = self.generation,
                now = timeline.generation(),
                "stale step, timeline changed since lookup"
            );
            return false;
        }

        self.applied = true;
        tx.set_index(self.target_index)
    }
}
