//! Newtype domain identifiers.
//!
//! An [`IssueId`] is generated once, at creation, by the injected
//! [`crate::IdGenerator`] and never changes afterwards. Wrapping the UUID keeps
//! issue identifiers from being confused with arbitrary strings at the
//! status-change boundary.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed, internally generated
// ---------------------------------------------------------------------------

/// Identifies a single maintenance issue for the lifetime of its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(Uuid);

impl IssueId {
    /// Generates a new random (v4) issue identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an [`IssueId`] from an existing UUID (e.g. parsed from user input).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IssueId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}
