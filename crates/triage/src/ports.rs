//! Capability traits the domain depends on.
//!
//! Infrastructure crates implement [`Classifier`]; the clock and id generator
//! have production implementations here because they need no I/O. Tests
//! inject deterministic versions of all three.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{ClassificationFailed, Description, IssueId, Timestamp, Verdict};

/// Maps a validated description to an urgency verdict.
///
/// Implementations are stateless between calls, have no side effects beyond
/// the outbound call, and must bound their own wait: a timeout is reported as
/// [`ClassificationFailed`] like every other failure.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classifies `description`.
    ///
    /// The description already satisfies the minimum-length rule; its content
    /// may be anything (any characters, any language).
    async fn classify(&self, description: &Description) -> Result<Verdict, ClassificationFailed>;
}

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Source of fresh, unique issue identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> IssueId;
}

// ---------------------------------------------------------------------------
// Production capabilities
// ---------------------------------------------------------------------------

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// [`IdGenerator`] producing random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> IssueId {
        IssueId::new_random()
    }
}

/// [`IdGenerator`] yielding `00000001-0000-0000-0000-000000000000`,
/// `00000002-...`, and so on, so short prefixes stay distinct.
///
/// Deterministic ids for tests and reproducible demos.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> IssueId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        IssueId::from_uuid(Uuid::from_u128(u128::from(n) << 96))
    }
}
