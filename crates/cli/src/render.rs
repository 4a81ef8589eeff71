//! Plain-text rendering of issues and user-facing error messages.

use std::fmt::Write as _;
use std::time::Duration;

use triage::{Issue, IssueStatus, Timestamp, TriageError, UrgencyLevel};

/// Number of id characters shown in listings; enough to address an issue.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(issue: &Issue) -> String {
    issue.id().to_string().chars().take(SHORT_ID_LEN).collect()
}

/// "just now", "5 minutes ago", "about 2 hours ago", "3 days ago".
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };
    match secs {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{} ago", plural(secs / 60, "minute")),
        3_600..=86_399 => format!("about {} ago", plural(secs / 3_600, "hour")),
        _ => format!("{} ago", plural(secs / 86_400, "day")),
    }
}

/// The command that advances an issue, if any.
pub fn next_action(status: IssueStatus) -> Option<&'static str> {
    match status.next()? {
        IssueStatus::InProgress => Some("start"),
        IssueStatus::Resolved => Some("resolve"),
        IssueStatus::Pending => None,
    }
}

/// The label as given, flagged when it is outside Low/Medium/High/Critical.
pub fn urgency_label(level: &UrgencyLevel) -> String {
    match level.rank() {
        Some(_) => level.to_string(),
        None => format!("{level} (unrecognised)"),
    }
}

pub fn issue_summary(issue: &Issue, now: Timestamp) -> String {
    format!(
        "[{}] {:<11} urgency: {:<8} reported {}\n    {}",
        short_id(issue),
        issue.status(),
        urgency_label(issue.urgency_level()),
        format_age(issue.age(now)),
        issue.description().as_str().trim(),
    )
}

pub fn issue_detail(issue: &Issue, now: Timestamp) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Issue {}", issue.id());
    let _ = writeln!(out, "  Status:     {}", issue.status());
    let _ = writeln!(out, "  Urgency:    {}", urgency_label(issue.urgency_level()));
    let _ = writeln!(
        out,
        "  Reported:   {} ({})",
        format_age(issue.age(now)),
        issue.created_at()
    );
    let _ = writeln!(out, "  Description:\n    {}", issue.description().as_str().trim());
    let _ = write!(out, "  Suggested solutions:\n    {}", issue.suggested_solutions());
    if let Some(action) = next_action(issue.status()) {
        let _ = write!(out, "\n  Next: {action} {}", short_id(issue));
    }
    out
}

pub fn issue_list(issues: &[Issue], now: Timestamp) -> String {
    if issues.is_empty() {
        return "No issues reported yet.".to_string();
    }
    issues
        .iter()
        .map(|issue| issue_summary(issue, now))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Message shown to the reporter for a failed operation.
pub fn user_message(err: &TriageError) -> String {
    match err {
        TriageError::ValidationFailed { message } => message.clone(),
        TriageError::ClassificationFailed(_) => {
            "Could not process the issue. Please try again.".to_string()
        }
        TriageError::IllegalTransition { from, to } => {
            format!("Cannot move issue from {from} to {to}.")
        }
    }
}
