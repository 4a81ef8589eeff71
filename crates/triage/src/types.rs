//! Value types for the intake-and-triage domain.
//!
//! Unlike [`crate::identifiers`], these types carry invariants: a
//! [`Description`] is always long enough to classify, an [`UrgencyLevel`] is
//! never empty, and an [`Issue`] only changes through its status.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{IssueId, TriageError};

/// Minimum number of characters (after trimming) a description must have.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

// ---------------------------------------------------------------------------
// Submission input
// ---------------------------------------------------------------------------

/// Raw input accepted at the submission boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// Free-text complaint as typed by the reporter.
    pub description: String,
}

impl Submission {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

// ---------------------------------------------------------------------------

/// A complaint description that has passed validation.
///
/// The text is kept verbatim; only the length check looks at the trimmed
/// form. Length is counted in Unicode scalar values, so non-Latin
/// descriptions are measured the same way as ASCII ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
    /// Validates `raw` and wraps it.
    ///
    /// # Errors
    ///
    /// [`TriageError::ValidationFailed`] when the trimmed text is shorter than
    /// [`MIN_DESCRIPTION_CHARS`].
    pub fn parse(raw: impl Into<String>) -> Result<Self, TriageError> {
        let raw = raw.into();
        if raw.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(TriageError::ValidationFailed {
                message: format!(
                    "Description must be at least {MIN_DESCRIPTION_CHARS} characters long."
                ),
            });
        }
        Ok(Self(raw))
    }

    /// Returns the description text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Classifier output
// ---------------------------------------------------------------------------

/// Urgency label assigned by the classifier.
///
/// Conventionally one of `Low`, `Medium`, `High`, `Critical`, but any
/// non-empty label is accepted: classifier output is not validated against
/// the conventional set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UrgencyLevel(String);

impl UrgencyLevel {
    /// The conventional labels, lowest first.
    pub const CONVENTIONAL: [&'static str; 4] = ["Low", "Medium", "High", "Critical"];

    /// Creates an [`UrgencyLevel`], returning `None` if the label is blank.
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        if label.trim().is_empty() {
            None
        } else {
            Some(Self(label))
        }
    }

    /// Returns the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position of the label in [`Self::CONVENTIONAL`] (case-insensitive),
    /// or `None` for a label outside the conventional set.
    pub fn rank(&self) -> Option<usize> {
        let label = self.0.trim();
        Self::CONVENTIONAL
            .iter()
            .position(|known| known.eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

// ---------------------------------------------------------------------------

/// The classifier's output: an urgency label paired with remediation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub urgency_level: UrgencyLevel,
    pub suggested_solutions: String,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle state of an [`Issue`].
///
/// Legal transitions are defined in [`crate::workflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    /// Initial state of every newly created issue.
    Pending,
    /// Someone has started working on the issue.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Terminal state.
    Resolved,
}

impl IssueStatus {
    /// Returns the display label (`"Pending"`, `"In Progress"`, `"Resolved"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns the timestamp `by` earlier than this one.
    ///
    /// Saturates at `self` if `by` does not fit the calendar range.
    pub fn earlier_by(self, by: Duration) -> Self {
        chrono::Duration::from_std(by)
            .ok()
            .and_then(|delta| self.0.checked_sub_signed(delta))
            .map_or(self, Self)
    }

    /// Time elapsed from `earlier` to `self`; zero if `earlier` is in the future.
    pub fn duration_since(self, earlier: Timestamp) -> Duration {
        (self.0 - earlier.0).to_std().unwrap_or_default()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Issue
// ---------------------------------------------------------------------------

/// A single maintenance complaint with its triage metadata.
///
/// Everything except `status` is fixed at creation. The status changes only
/// through [`crate::TriageWorkflow`] (or the unguarded
/// [`crate::IssueStore::update_status`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    id: IssueId,
    description: Description,
    status: IssueStatus,
    urgency_level: UrgencyLevel,
    suggested_solutions: String,
    created_at: Timestamp,
}

impl Issue {
    /// Assembles a fresh `Pending` issue from a classified description.
    pub(crate) fn assemble(
        id: IssueId,
        description: Description,
        verdict: Verdict,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            description,
            status: IssueStatus::Pending,
            urgency_level: verdict.urgency_level,
            suggested_solutions: verdict.suggested_solutions,
            created_at,
        }
    }

    pub fn id(&self) -> IssueId {
        self.id
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn status(&self) -> IssueStatus {
        self.status
    }

    pub fn urgency_level(&self) -> &UrgencyLevel {
        &self.urgency_level
    }

    pub fn suggested_solutions(&self) -> &str {
        &self.suggested_solutions
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// How long ago the issue was reported, relative to `now`.
    pub fn age(&self, now: Timestamp) -> Duration {
        now.duration_since(self.created_at)
    }

    pub(crate) fn set_status(&mut self, status: IssueStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(urgency: &str, solutions: &str) -> Verdict {
        Verdict {
            urgency_level: UrgencyLevel::new(urgency).unwrap(),
            suggested_solutions: solutions.to_string(),
        }
    }

    #[test]
    fn test_description_rejects_short_input() {
        for raw in ["", "short", "         ", "  123456789  ", "\n\tabc\n"] {
            let err = Description::parse(raw).unwrap_err();
            assert!(
                matches!(&err, TriageError::ValidationFailed { message } if message.contains("at least 10 characters")),
                "unexpected result for {raw:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_description_accepts_exactly_ten_characters() {
        assert!(Description::parse("1234567890").is_ok());
    }

    #[test]
    fn test_description_is_kept_verbatim() {
        let d = Description::parse("  Broken window in room 12  ").unwrap();
        assert_eq!(d.as_str(), "  Broken window in room 12  ");
    }

    #[test]
    fn test_description_counts_characters_not_bytes() {
        // Nine characters, but more than ten bytes.
        assert!(Description::parse("ééééééééé").is_err());
        assert!(Description::parse("水漏れがひどいです。至急").is_ok());
    }

    #[test]
    fn test_urgency_accepts_any_non_empty_label() {
        assert!(UrgencyLevel::new("").is_none());
        assert!(UrgencyLevel::new("   ").is_none());
        let odd = UrgencyLevel::new("Urgent-ish").unwrap();
        assert_eq!(odd.as_str(), "Urgent-ish");
        assert_eq!(odd.rank(), None);
    }

    #[test]
    fn test_urgency_rank_for_conventional_labels() {
        assert_eq!(UrgencyLevel::new("Low").unwrap().rank(), Some(0));
        assert_eq!(UrgencyLevel::new("medium").unwrap().rank(), Some(1));
        assert_eq!(UrgencyLevel::new("HIGH").unwrap().rank(), Some(2));
        assert_eq!(UrgencyLevel::new("Critical").unwrap().rank(), Some(3));
    }

    #[test]
    fn test_status_serializes_with_display_labels() {
        let json = serde_json::to_string(&IssueStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: IssueStatus = serde_json::from_str("\"Resolved\"").unwrap();
        assert_eq!(back, IssueStatus::Resolved);
        assert_eq!(IssueStatus::InProgress.to_string(), "In Progress");
    }

    #[test]
    fn test_issue_serializes_with_camel_case_fields() {
        let issue = Issue::assemble(
            IssueId::new_random(),
            Description::parse("The heating in block C is off.").unwrap(),
            verdict("Medium", "Check the boiler."),
            Timestamp::now(),
        );
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["status"], "Pending");
        assert_eq!(value["urgencyLevel"], "Medium");
        assert_eq!(value["suggestedSolutions"], "Check the boiler.");
        assert!(value["createdAt"].is_string());
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_age_is_measured_from_creation() {
        let now = Timestamp::now();
        let created = now.earlier_by(Duration::from_secs(7200));
        let issue = Issue::assemble(
            IssueId::new_random(),
            Description::parse("Projector in hall B is dead.").unwrap(),
            verdict("Medium", "Check the power cable."),
            created,
        );
        assert_eq!(issue.age(now), Duration::from_secs(7200));
        // A clock that went backwards never yields a negative age.
        assert_eq!(issue.age(created.earlier_by(Duration::from_secs(5))), Duration::ZERO);
    }
}
