//! Request disablement — which requests the cursor has (partly) undone.
//!
//! A pure projection of `(history, index)`. The timeline recomputes it from
//! scratch after every committed change; history is bounded by chat length so
//! the O(total stops) walk is cheap.

use edit_timeline_types::{RequestEntry, RequestId, StopId};
use serde::Serialize;

/// One request that is not fully active.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDisablement {
    pub request_id: RequestId,
    /// `None`: every stop of the request is undone.
    /// `Some(id)`: the request straddles the cursor and `id` is its last
    /// active stop (`StopId::Root` when only the root stop is active).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_undo_stop: Option<StopId>,
}

impl RequestDisablement {
    /// Entire request undone.
    pub fn full(request_id: impl Into<RequestId>) -> Self {
        Self {
            request_id: request_id.into(),
            after_undo_stop: None,
        }
    }

    /// Request undone after `stop_id`.
    pub fn after(request_id: impl Into<RequestId>, stop_id: StopId) -> Self {
        Self {
            request_id: request_id.into(),
            after_undo_stop: Some(stop_id),
        }
    }

    pub fn is_full(&self) -> bool {
        self.after_undo_stop.is_none()
    }
}

/// Project `(history, index)` onto the disablement list, in history order.
pub fn project(history: &[RequestEntry], index: usize) -> Vec<RequestDisablement> {
    let mut disabled = Vec::new();
    let mut start = 0;

    for entry in history {
        let end = start + entry.stops.len();
        if start >= index {
            disabled.push(RequestDisablement::full(entry.request_id.clone()));
        } else if end > index {
            // start < index < end, so index - 1 - start is in bounds
            let last_active = &entry.stops[index - 1 - start];
            disabled.push(RequestDisablement::after(
                entry.request_id.clone(),
                last_active.stop_id.clone(),
            ));
        }
        start = end;
    }

    disabled
}
