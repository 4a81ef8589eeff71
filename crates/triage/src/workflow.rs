//! Triage Workflow: the forward-only status state machine.
//!
//! ```text
//! Pending ──start──▶ In Progress ──resolve──▶ Resolved (terminal)
//! ```
//!
//! Every transition is an explicit user action. Anything else, including a
//! repeated request for the current status, is rejected with
//! [`TriageError::IllegalTransition`] and leaves the store untouched.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{IssueId, IssueStatus, IssueStore, TriageError};

impl IssueStatus {
    /// The single status this one may advance to, or `None` when terminal.
    pub fn next(self) -> Option<IssueStatus> {
        match self {
            Self::Pending => Some(Self::InProgress),
            Self::InProgress => Some(Self::Resolved),
            Self::Resolved => None,
        }
    }

    /// Returns `true` if moving from `self` to `to` is a legal transition.
    pub fn can_transition_to(self, to: IssueStatus) -> bool {
        self.next() == Some(to)
    }
}

/// Checks a requested transition.
///
/// # Errors
///
/// [`TriageError::IllegalTransition`] unless `to` is the immediate successor
/// of `from`.
pub fn check_transition(from: IssueStatus, to: IssueStatus) -> Result<IssueStatus, TriageError> {
    if from.can_transition_to(to) {
        Ok(to)
    } else {
        Err(TriageError::IllegalTransition { from, to })
    }
}

/// Result of a guarded status change that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StatusChange {
    /// The transition was legal and has been stored.
    Applied { from: IssueStatus, to: IssueStatus },
    /// No issue with that id exists; nothing happened.
    NotFound,
}

/// Guarded entry point for status changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TriageWorkflow;

impl TriageWorkflow {
    pub fn new() -> Self {
        Self
    }

    /// Moves issue `id` to `requested` if the workflow allows it.
    ///
    /// The legality check and the write happen under the store's lock, so
    /// concurrent requests for the same issue cannot both succeed.
    ///
    /// # Errors
    ///
    /// [`TriageError::IllegalTransition`] for out-of-order, self, or
    /// post-terminal requests. An unknown id is not an error.
    #[instrument(name = "change_status", skip_all, fields(issue_id = %id, requested = %requested))]
    pub fn change_status(
        &self,
        store: &IssueStore,
        id: IssueId,
        requested: IssueStatus,
    ) -> Result<StatusChange, TriageError> {
        match store.compare_and_set_status(id, |current| check_transition(current, requested)) {
            None => {
                info!("Status change for unknown issue ignored");
                Ok(StatusChange::NotFound)
            }
            Some(Ok(from)) => {
                info!(%from, to = %requested, "Status changed");
                Ok(StatusChange::Applied {
                    from,
                    to: requested,
                })
            }
            Some(Err(e)) => {
                warn!(error = %e, "Status change rejected");
                Err(e)
            }
        }
    }

    /// Pending → In Progress.
    pub fn start(&self, store: &IssueStore, id: IssueId) -> Result<StatusChange, TriageError> {
        self.change_status(store, id, IssueStatus::InProgress)
    }

    /// In Progress → Resolved.
    pub fn resolve(&self, store: &IssueStore, id: IssueId) -> Result<StatusChange, TriageError> {
        self.change_status(store, id, IssueStatus::Resolved)
    }
}
