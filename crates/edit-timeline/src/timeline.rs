//! The timeline engine — request/stop history plus the undo cursor.
//!
//! # Model
//!
//! ```text
//! history:  [ r1: root, s1, post ] [ r2: root, post ] [ r3: root ]
//! flat:       0     1   2            3     4            5
//! index = 4 ─────────────────────────────────┘ (flat[3] is the active stop)
//! ```
//!
//! `index` counts active stops. Undo moves it left, redo right, and a push
//! from anywhere but the tip first discards everything at or after `index`.
//! Once any stop exists `index` never drops below 1: the first stop is the
//! pre-edit baseline and can't be undone away.

use edit_timeline_types::{
    FileUri, PersistedState, RequestEntry, RequestId, Snapshot, SnapshotEntry, Stop, StopId,
    TimelineId,
};
use tokio::sync::broadcast;

use crate::config::TimelineConfig;
use crate::disablement::{self, RequestDisablement};
use crate::event::{TimelineEvent, TimelineStatus};
use crate::step::{Step, StepKind};
use crate::transaction::Transaction;
use crate::Result;

/// Branching undo/redo history over multi-file checkpoints.
pub struct Timeline {
    id: TimelineId,
    pub(crate) config: TimelineConfig,
    pub(crate) history: Vec<RequestEntry>,
    pub(crate) index: usize,
    pub(crate) generation: u64,
    /// Recomputed on every commit.
    disablement: Vec<RequestDisablement>,
    event_tx: broadcast::Sender<TimelineEvent>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeline")
            .field("id", &self.id)
            .field("requests", &self.history.len())
            .field("stops", &self.stop_count())
            .field("index", &self.index)
            .field("generation", &self.generation)
            .finish()
    }
}

impl Timeline {
    /// An empty timeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(TimelineConfig::default())
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            id: TimelineId::new(),
            config,
            history: Vec::new(),
            index: 0,
            generation: 0,
            disablement: Vec::new(),
            event_tx,
        }
    }

    /// Build a timeline directly from persisted state.
    pub fn from_state(config: TimelineConfig, state: PersistedState) -> Result<Self> {
        let mut timeline = Self::with_config(config);
        timeline.restore_from_state(state)?;
        Ok(timeline)
    }

    /// Build a timeline from persisted JSON.
    pub fn from_json(config: TimelineConfig, json: &str) -> Result<Self> {
        let state = PersistedState::from_json(json)?;
        Self::from_state(config, state)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> TimelineId {
        self.id
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Number of active stops.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bumped on every change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Request entries in push order.
    pub fn history(&self) -> &[RequestEntry] {
        &self.history
    }

    /// Total stops across all requests.
    pub fn stop_count(&self) -> usize {
        self.history.iter().map(|e| e.stops.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 1
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.stop_count()
    }

    /// Requests that are wholly or partly undone, in history order.
    pub fn request_disablement(&self) -> &[RequestDisablement] {
        &self.disablement
    }

    /// The full derived view.
    pub fn status(&self) -> TimelineStatus {
        TimelineStatus {
            generation: self.generation,
            index: self.index,
            stop_count: self.stop_count(),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            disablement: self.disablement.clone(),
        }
    }

    /// Subscribe to the change feed.
    pub fn subscribe(&self) -> broadcast::Receiver<TimelineEvent> {
        self.event_tx.subscribe()
    }

    /// Request ids in history order.
    pub fn request_ids(&self) -> impl Iterator<Item = &RequestId> {
        self.history.iter().map(|e| &e.request_id)
    }

    /// Stops recorded for `request_id` in timeline order, across every
    /// history entry carrying that id. Empty for an unknown request.
    pub fn stops_for_request(&self, request_id: &str) -> Vec<&Stop> {
        self.history
            .iter()
            .filter(|e| e.request_id == request_id)
            .flat_map(|e| &e.stops)
            .collect()
    }

    /// The active stop, `None` only for an empty timeline.
    pub fn current_stop(&self) -> Option<&Stop> {
        self.index.checked_sub(1).and_then(|pos| self.stop_at(pos).map(|(_, stop)| stop))
    }

    /// Captured content of `uri` at the given stop.
    pub fn content_at_stop(&self, request_id: &str, stop_id: &StopId, uri: &FileUri) -> Option<&str> {
        let (_, stop) = self.find_stop(request_id, stop_id)?;
        stop.snapshot.get(uri).map(|entry| entry.content.as_str())
    }

    // =========================================================================
    // Flat addressing
    // =========================================================================

    /// Stop at flat position `pos`, with its owning request.
    fn stop_at(&self, pos: usize) -> Option<(&RequestId, &Stop)> {
        let mut start = 0;
        for entry in &self.history {
            if pos < start + entry.stops.len() {
                return Some((&entry.request_id, &entry.stops[pos - start]));
            }
            start += entry.stops.len();
        }
        None
    }

    /// Flat position and stop matching both ids.
    fn find_stop(&self, request_id: &str, stop_id: &StopId) -> Option<(usize, &Stop)> {
        let mut start = 0;
        for entry in &self.history {
            if entry.request_id == request_id {
                if let Some(i) = entry.position_of(stop_id) {
                    return Some((start + i, &entry.stops[i]));
                }
            }
            start += entry.stops.len();
        }
        None
    }

    pub(crate) fn find_stop_mut(&mut self, request_id: &str, stop_id: &StopId) -> Option<&mut Stop> {
        self.history
            .iter_mut()
            .filter(|e| e.request_id == request_id)
            .find_map(|e| e.stops.iter_mut().find(|s| &s.stop_id == stop_id))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Open a write scope. Changes publish when it is dropped.
    pub fn transaction(&mut self) -> Transaction<'_> {
        Transaction::new(self)
    }

    /// Record a checkpoint for `request_id`, discarding any undone future.
    #[tracing::instrument(skip(self, snapshot), fields(files = snapshot.len()), name = "timeline.push")]
    pub fn push_snapshot(&mut self, request_id: RequestId, stop_id: StopId, snapshot: Snapshot) {
        self.transaction().push_snapshot(request_id, stop_id, snapshot);
    }

    /// Replace history and cursor from persisted state, as one update.
    #[tracing::instrument(skip(self, state), fields(requests = state.history.len(), index = state.index), name = "timeline.restore")]
    pub fn restore_from_state(&mut self, state: PersistedState) -> Result<()> {
        self.transaction().restore_from_state(state)
    }

    /// Replace one file's captured entry inside an existing stop.
    #[tracing::instrument(skip(self, entry), name = "timeline.amend")]
    pub fn amend_stop_entry(
        &mut self,
        request_id: &str,
        stop_id: &StopId,
        uri: FileUri,
        entry: SnapshotEntry,
    ) -> bool {
        self.transaction().amend_stop_entry(request_id, stop_id, uri, entry)
    }

    // =========================================================================
    // Steps
    // =========================================================================

    /// Step back one stop. `None` at the floor.
    pub fn undo_step(&self) -> Option<Step> {
        if self.index <= 1 {
            return None;
        }
        let (request_id, stop) = self.stop_at(self.index - 2)?;
        Some(Step::new(StepKind::Undo, self, request_id.clone(), stop.clone(), self.index - 1))
    }

    /// Step forward one stop. `None` at the tip.
    pub fn redo_step(&self) -> Option<Step> {
        let (request_id, stop) = self.stop_at(self.index)?;
        Some(Step::new(StepKind::Redo, self, request_id.clone(), stop.clone(), self.index + 1))
    }

    /// Jump to a specific stop, forward or backward.
    ///
    /// Ids match exactly; an empty named id never matches.
    pub fn snapshot_for_restore(&self, request_id: &str, stop_id: &StopId) -> Option<Step> {
        if matches!(stop_id, StopId::Named(s) if s.is_empty()) {
            return None;
        }
        let (pos, stop) = self.find_stop(request_id, stop_id)?;
        Some(Step::new(StepKind::Restore, self, request_id.into(), stop.clone(), pos + 1))
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Full history and cursor. Pure read.
    pub fn state_for_persistence(&self) -> PersistedState {
        PersistedState {
            history: self.history.clone(),
            index: self.index as i64,
        }
    }

    /// Persisted state as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(self.state_for_persistence().to_json_pretty()?)
    }

    // =========================================================================
    // Publishing
    // =========================================================================

    /// Recompute derived state and notify subscribers. Called once per
    /// committed transaction.
    pub(crate) fn publish(&mut self, restored: bool) {
        self.disablement = disablement::project(&self.history, self.index);
        let status = self.status();
        tracing::trace!(
            generation = status.generation,
            index = status.index,
            stops = status.stop_count,
            "timeline changed"
        );
        let event = if restored {
            TimelineEvent::Restored(status)
        } else {
            TimelineEvent::Changed(status)
        };
        // No subscribers is fine.
        let _ = self.event_tx.send(event);
    }
}
