//! Intake-and-triage domain for CampusCare.
//!
//! A reporter submits a free-text maintenance complaint; the
//! [`IssueFactory`] validates it, asks a [`Classifier`] for an urgency
//! verdict, and assembles a `Pending` [`Issue`]. The caller inserts the issue
//! into an [`IssueStore`], after which [`TriageWorkflow`] governs its status.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! The classification engine is reached through the [`Classifier`] trait,
//! implemented by the `llm` crate; clock and id generation are injected
//! through [`Clock`] and [`IdGenerator`].
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | `IssueId` |
//! | [`types`] | `Issue`, `Description`, `UrgencyLevel`, `IssueStatus`, `Verdict`, `Timestamp` |
//! | [`errors`] | `TriageError`, `ClassificationFailed` |
//! | [`ports`] | `Classifier`, `Clock`, `IdGenerator` and their production implementations |
//! | [`factory`] | `IssueFactory` |
//! | [`store`] | `IssueStore` |
//! | [`workflow`] | Status state machine and the guarded `TriageWorkflow` |
//! | [`seed`] | Demo issues |

pub mod errors;
pub mod factory;
pub mod identifiers;
pub mod ports;
pub mod seed;
pub mod store;
pub mod types;
pub mod workflow;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ClassificationFailed, TriageError};
pub use factory::IssueFactory;
pub use identifiers::IssueId;
pub use ports::{Classifier, Clock, IdGenerator, RandomIdGenerator, SequentialIdGenerator, SystemClock};
pub use store::IssueStore;
pub use types::{
    Description, Issue, IssueStatus, Submission, Timestamp, UrgencyLevel, Verdict,
    MIN_DESCRIPTION_CHARS,
};
pub use workflow::{check_transition, StatusChange, TriageWorkflow};
