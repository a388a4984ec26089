//! Typed identifiers for timelines, requests, and tracked files.
//!
//! `TimelineId` wraps a UUIDv7 (time-ordered, globally unique) and follows the
//! same display conventions as every other UUID-backed id: full hyphenated form
//! for logs, `short()` (first 8 hex chars) for humans, never for lookup.
//!
//! `RequestId` and `FileUri` are string newtypes. Request ids come from the
//! host's chat model and file uris from its workspace, so both are opaque here
//! and compared byte-for-byte.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A timeline identifier (UUIDv7).
///
/// Every `Timeline` gets one at construction; steps carry it so they can't be
/// applied to a different timeline by accident.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimelineId(uuid::Uuid);

impl TimelineId {
    /// Create a new time-ordered ID (UUIDv7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// First 8 hex characters — for human display only, not lookup.
    pub fn short(&self) -> String {
        self.0.as_simple().to_string()[..8].to_string()
    }

    /// Parse from a hex string (32 chars, no hyphens) or standard UUID format.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TimelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimelineId({})", self.short())
    }
}

// ── String-backed ids ──────────────────────────────────────────────────────

macro_rules! impl_string_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Wrap a raw string.
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// The raw string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check for the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl From<&str> for $T {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $T {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $T {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $T {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $T {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", $name, self.0)
            }
        }
    };
}

/// A chat request identifier.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

/// A tracked file identity (URI-like key).
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileUri(String);

impl_string_id!(RequestId, "RequestId");
impl_string_id!(FileUri, "FileUri");

impl RequestId {
    /// Generate a fresh request id (UUIDv7 hex) for hosts without their own.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().as_simple().to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
