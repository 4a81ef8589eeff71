//! In-memory, newest-first issue collection.
//!
//! One [`IssueStore`] lives for one session (or one test). Methods take
//! `&self`, so the store can be shared behind an `Arc` by concurrently
//! classifying submissions; insertion order is completion order.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::{Issue, IssueId, IssueStatus};

#[derive(Debug, Default)]
pub struct IssueStore {
    // Index 0 is the newest issue.
    issues: RwLock<Vec<Issue>>,
}

impl IssueStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `issues` in the given (newest-first) order.
    pub fn with_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        Self {
            issues: RwLock::new(issues.into_iter().collect()),
        }
    }

    /// Prepends `issue` so it is first in [`Self::list`] order.
    ///
    /// Id uniqueness is the factory's contract and is not re-checked here.
    pub fn insert(&self, issue: Issue) {
        debug!(issue_id = %issue.id(), "Inserting issue");
        self.write().insert(0, issue);
    }

    /// Sets the status of issue `id` unconditionally.
    ///
    /// Unknown ids are a no-op. Workflow legality is not checked here; use
    /// [`crate::TriageWorkflow`] for guarded changes. Returns whether an issue
    /// was updated.
    pub fn update_status(&self, id: IssueId, new_status: IssueStatus) -> bool {
        match self.write().iter_mut().find(|issue| issue.id() == id) {
            Some(issue) => {
                issue.set_status(new_status);
                true
            }
            None => false,
        }
    }

    /// Applies `decide` to the current status of issue `id` and stores the
    /// status it returns, all under one write lock.
    ///
    /// Returns `None` for an unknown id. When `decide` fails, the stored
    /// status is left unchanged and the error is returned.
    pub(crate) fn compare_and_set_status<E>(
        &self,
        id: IssueId,
        decide: impl FnOnce(IssueStatus) -> Result<IssueStatus, E>,
    ) -> Option<Result<IssueStatus, E>> {
        let mut issues = self.write();
        let issue = issues.iter_mut().find(|issue| issue.id() == id)?;
        let current = issue.status();
        Some(decide(current).map(|next| {
            issue.set_status(next);
            current
        }))
    }

    /// Returns a copy of the issue with `id`, if present.
    pub fn get(&self, id: IssueId) -> Option<Issue> {
        self.read().iter().find(|issue| issue.id() == id).cloned()
    }

    /// Point-in-time snapshot of all issues, newest first.
    pub fn list(&self) -> Vec<Issue> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written issue: every
    // mutation is a single insert or field assignment.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Issue>> {
        self.issues.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Issue>> {
        self.issues.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Description, Timestamp, UrgencyLevel, Verdict};

    fn issue(text: &str) -> Issue {
        Issue::assemble(
            IssueId::new_random(),
            Description::parse(text).unwrap(),
            Verdict {
                urgency_level: UrgencyLevel::new("Low").unwrap(),
                suggested_solutions: "Have a look.".into(),
            },
            Timestamp::now(),
        )
    }

    #[test]
    fn test_insert_puts_newest_first() {
        let store = IssueStore::new();
        let a = issue("Issue A: dripping tap in lab");
        let b = issue("Issue B: broken chair in library");
        store.insert(a.clone());
        store.insert(b.clone());

        let ids: Vec<_> = store.list().iter().map(Issue::id).collect();
        assert_eq!(ids, vec![b.id(), a.id()]);
    }

    #[test]
    fn test_update_status_is_visible_in_list() {
        let store = IssueStore::new();
        let a = issue("Radiator in room 101 is cold");
        store.insert(a.clone());

        assert!(store.update_status(a.id(), IssueStatus::InProgress));
        assert_eq!(store.list()[0].status(), IssueStatus::InProgress);
    }

    #[test]
    fn test_update_status_for_unknown_id_is_noop() {
        let store = IssueStore::new();
        let a = issue("Radiator in room 101 is cold");
        store.insert(a.clone());

        assert!(!store.update_status(IssueId::new_random(), IssueStatus::Resolved));
        assert_eq!(store.list(), vec![a]);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let store = IssueStore::new();
        let a = issue("Window latch broken in 2F");
        store.insert(a.clone());

        let snapshot = store.list();
        store.update_status(a.id(), IssueStatus::InProgress);
        store.insert(issue("Another issue to report here"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].status(), IssueStatus::Pending);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_with_issues_keeps_given_order() {
        let a = issue("First seeded issue text");
        let b = issue("Second seeded issue text");
        let store = IssueStore::with_issues(vec![a.clone(), b.clone()]);
        assert_eq!(store.list(), vec![a.clone(), b]);
        assert_eq!(store.get(a.id()), Some(a));
        assert!(!store.is_empty());
    }

    #[test]
    fn test_compare_and_set_leaves_status_on_rejection() {
        let store = IssueStore::new();
        let a = issue("Ceiling tile about to fall");
        store.insert(a.clone());

        let outcome = store.compare_and_set_status(a.id(), |_| Err::<IssueStatus, _>("nope"));
        assert_eq!(outcome, Some(Err("nope")));
        assert_eq!(store.get(a.id()).unwrap().status(), IssueStatus::Pending);

        let missing =
            store.compare_and_set_status(IssueId::new_random(), |s| Ok::<_, ()>(s));
        assert!(missing.is_none());
    }
}
