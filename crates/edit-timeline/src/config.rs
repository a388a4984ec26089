//! Timeline configuration.
//!
//! Loaded from RON. Every field has a default, so an empty `()` file (or no
//! file at all) yields [`TimelineConfig::default`].
//!
//! ```ron
//! (
//!     event_capacity: 128,
//!     restore_policy: clamp,
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// How `restore_from_state` treats persisted state that breaks the timeline's
/// invariants (cursor out of range, requests with no stops).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RestorePolicy {
    /// Refuse the state and leave the timeline untouched.
    #[default]
    Reject,
    /// Drop empty requests and pull the cursor into range.
    Clamp,
}

/// Tunables for a [`Timeline`](crate::Timeline).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Capacity of the change-feed broadcast channel. Slow subscribers lag
    /// (and see `RecvError::Lagged`) once this many events are buffered.
    pub event_capacity: usize,
    /// Policy for malformed persisted state.
    pub restore_policy: RestorePolicy,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            event_capacity: 64,
            restore_policy: RestorePolicy::Reject,
        }
    }
}

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

impl TimelineConfig {
    /// Parse a RON document.
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Read and parse a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron(&text)
    }

    /// Load `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Ok(Self::load(path)?),
            None => Ok(Self::default()),
        }
    }

    /// Same config with a different restore policy.
    pub fn with_restore_policy(mut self, policy: RestorePolicy) -> Self {
        self.restore_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ron_is_default() {
        assert_eq!(TimelineConfig::from_ron("()").unwrap(), TimelineConfig::default());
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let config = TimelineConfig::from_ron("(restore_policy: clamp)").unwrap();
        assert_eq!(config.restore_policy, RestorePolicy::Clamp);
        assert_eq!(config.event_capacity, 64);
    }

    #[test]
    fn test_bad_ron_is_an_error() {
        assert!(matches!(
            TimelineConfig::from_ron("(restore_policy: sideways)"),
            Err(ConfigError::Ron(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timeline.ron");
        std::fs::write(&path, "(event_capacity: 8)").unwrap();

        let config = TimelineConfig::load(&path).unwrap();
        assert_eq!(config.event_capacity, 8);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TimelineConfig::load(dir.path().join("nope.ron")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(TimelineConfig::load_or_default(None).unwrap(), TimelineConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let err = TimelineConfig::load_or_default(Some(dir.path().join("nope.ron").as_path())).unwrap_err();
        assert!(matches!(err, crate::TimelineError::Config(ConfigError::Io(_))));
    }

    #[test]
    fn test_restore_policy_strings() {
        assert_eq!(RestorePolicy::Clamp.to_string(), "clamp");
        assert_eq!("reject".parse::<RestorePolicy>().unwrap(), RestorePolicy::Reject);
        assert!("sideways".parse::<RestorePolicy>().is_err());
    }
}
