//! Error types for timeline operations.

use edit_timeline_types::{RequestId, StateError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur when restoring or loading a timeline.
///
/// Everyday navigation never errors: lookups return `Option` and pushes
/// always succeed.
#[derive(Error, Debug)]
pub enum TimelineError {
    /// Persisted cursor outside `[floor, stop_count]`.
    #[error("cursor {index} out of range for timeline with {len} stops")]
    IndexOutOfRange { index: i64, len: usize },

    /// Persisted request entry with no stops.
    #[error("request {0} has no stops")]
    EmptyRequest(RequestId),

    /// Persisted state could not be encoded or decoded.
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
