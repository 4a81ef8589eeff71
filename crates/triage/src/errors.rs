//! Error types for the intake-and-triage domain.
//!
//! [`TriageError`] is the single error surfaced to the submission and
//! status-change boundaries. [`ClassificationFailed`] is the only error a
//! [`crate::Classifier`] may report; it is propagated verbatim by the
//! [`crate::IssueFactory`] and never retried inside this crate. Retry is a
//! caller decision: the submitted description is not retained anywhere, so
//! retrying means the reporter resubmits.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::IssueStatus;

// ---------------------------------------------------------------------------
// Classifier failure
// ---------------------------------------------------------------------------

/// The classification engine did not produce a usable verdict.
///
/// Covers an unreachable engine, a timeout, output failing schema validation,
/// and empty output. The cause is kept for logs only; callers must not branch
/// on it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Classification failed: {reason}")]
pub struct ClassificationFailed {
    /// Human-readable cause, suitable for operator logs.
    pub reason: String,
}

impl ClassificationFailed {
    /// Creates a [`ClassificationFailed`] from any displayable cause.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Errors reported by issue creation and status changes.
///
/// No variant leaves a partially constructed issue behind, and none mutates
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TriageError {
    /// The submitted description failed input validation.
    ///
    /// Produced before the classifier is contacted.
    #[error("{message}")]
    ValidationFailed {
        /// Message identifying the violated rule, shown to the reporter as-is.
        message: String,
    },

    /// The classifier could not produce a verdict for the submission.
    #[error(transparent)]
    ClassificationFailed(#[from] ClassificationFailed),

    /// A status change was requested out of workflow order.
    #[error("Illegal status transition: {from} -> {to}")]
    IllegalTransition {
        /// Status the issue currently has.
        from: IssueStatus,
        /// Status that was requested.
        to: IssueStatus,
    },
}
