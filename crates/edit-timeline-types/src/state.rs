//! Persisted timeline state.
//!
//! The shape a session store writes to disk and hands back on reload:
//!
//! ```text
//! { "history": [ { "requestId": "...",
//!                  "stops": [ { "stopId": "..." | null, "entries": { uri: { "requestId", "content" } } } ] } ],
//!   "index": 3 }
//! ```
//!
//! `index` is signed on the wire so a corrupt negative value still reaches the
//! timeline's restore policy instead of failing deserialization.

use serde::{Deserialize, Serialize};

use crate::stop::RequestEntry;

/// Errors from encoding or decoding persisted state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("postcard error: {0}")]
    Postcard(#[from] postcard::Error),
}

/// Full history plus cursor, as persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub history: Vec<RequestEntry>,
    pub index: i64,
}

impl PersistedState {
    /// An empty timeline: no history, cursor at zero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total number of stops across all requests.
    pub fn stop_count(&self) -> usize {
        self.history.iter().map(|e| e.stops.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Compact binary encoding for session storage.
    pub fn to_postcard(&self) -> Result<Vec<u8>, StateError> {
        Ok(postcard::to_stdvec(self)?)
    }

    pub fn from_postcard(bytes: &[u8]) -> Result<Self, StateError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}
