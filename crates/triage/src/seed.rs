//! Sample issues for demo sessions.

use std::time::Duration;

use uuid::Uuid;

use crate::{Description, Issue, IssueId, IssueStatus, Timestamp, TriageError, UrgencyLevel, Verdict};

const HOUR: Duration = Duration::from_secs(60 * 60);

/// Two sample issues, newest first, aged relative to `now`.
///
/// Ids are fixed (`00000001-...`, `00000002-...`) so the demo is reproducible;
/// ids from [`crate::RandomIdGenerator`] cannot collide with them in practice.
/// The counter sits in the leading bytes so every short id prefix is distinct.
pub fn demo_issues(now: Timestamp) -> Result<Vec<Issue>, TriageError> {
    let projector = demo_issue(
        1,
        "The projector in lecture hall B is not turning on. It seems to be a power issue as the light indicator is off.",
        "Medium",
        "First, check if the projector is properly plugged into a working power outlet. If the issue persists, the power cable or the internal power supply might need to be replaced by a technician.",
        now.earlier_by(2 * HOUR),
        IssueStatus::Pending,
    )?;
    let graffiti = demo_issue(
        2,
        "Graffiti on the wall near the library entrance.",
        "Low",
        "Schedule a cleaning crew to remove the graffiti using appropriate cleaning agents. Consider installing a camera for monitoring.",
        now.earlier_by(72 * HOUR),
        IssueStatus::Resolved,
    )?;
    Ok(vec![projector, graffiti])
}

fn demo_issue(
    n: u128,
    description: &str,
    urgency: &str,
    solutions: &str,
    created_at: Timestamp,
    status: IssueStatus,
) -> Result<Issue, TriageError> {
    let urgency_level = UrgencyLevel::new(urgency).ok_or_else(|| TriageError::ValidationFailed {
        message: "Urgency level must not be empty.".into(),
    })?;
    let mut issue = Issue::assemble(
        IssueId::from_uuid(Uuid::from_u128(n << 96)),
        Description::parse(description)?,
        Verdict {
            urgency_level,
            suggested_solutions: solutions.to_string(),
        },
        created_at,
    );
    issue.set_status(status);
    Ok(issue)
}
