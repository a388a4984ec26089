//! Change feed.
//!
//! Every committed transaction that changed the timeline broadcasts exactly one
//! event carrying the full derived view, so subscribers never observe a new
//! history paired with a stale cursor. Sends never block and need no runtime;
//! with no subscribers the event is simply dropped.

use crate::disablement::RequestDisablement;

/// Derived, host-visible view of a timeline at one generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineStatus {
    /// Bumped on every change; steps created at an older generation are stale.
    pub generation: u64,
    /// Number of active stops.
    pub index: usize,
    /// Total number of stops.
    pub stop_count: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub disablement: Vec<RequestDisablement>,
}

/// Events broadcast when the timeline changes.
#[derive(Clone, Debug)]
pub enum TimelineEvent {
    /// A push, step application, or stop amendment was committed.
    Changed(TimelineStatus),
    /// The whole timeline was replaced from persisted state.
    Restored(TimelineStatus),
}

impl TimelineEvent {
    pub fn status(&self) -> &TimelineStatus {
        match self {
            TimelineEvent::Changed(status) | TimelineEvent::Restored(status) => status,
        }
    }
}
