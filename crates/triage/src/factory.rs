//! Issue Factory: validate, classify, assemble.
//!
//! [`IssueFactory::create_issue`] has exactly one external side effect, the
//! classifier call. It never touches a store; the caller inserts the returned
//! issue, so a failed or abandoned classification leaves nothing behind.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    Classifier, Clock, Description, IdGenerator, Issue, RandomIdGenerator, Submission,
    SystemClock, TriageError,
};

/// Builds complete [`Issue`] records from raw submissions.
#[derive(Clone)]
pub struct IssueFactory {
    classifier: Arc<dyn Classifier>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl IssueFactory {
    /// Creates a factory with the system clock and random UUID ids.
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self::with_capabilities(
            classifier,
            Arc::new(SystemClock),
            Arc::new(RandomIdGenerator),
        )
    }

    /// Creates a factory with explicitly injected capabilities.
    pub fn with_capabilities(
        classifier: Arc<dyn Classifier>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            classifier,
            clock,
            ids,
        }
    }

    /// Validates `submission`, classifies it, and returns a new `Pending` issue.
    ///
    /// # Errors
    ///
    /// - [`TriageError::ValidationFailed`] if the trimmed description is too
    ///   short. The classifier is not called.
    /// - [`TriageError::ClassificationFailed`] exactly as reported by the
    ///   classifier; no retry happens here.
    #[instrument(
        name = "create_issue",
        skip_all,
        fields(description_len = submission.description.len(), issue_id = tracing::field::Empty)
    )]
    pub async fn create_issue(&self, submission: Submission) -> Result<Issue, TriageError> {
        let description = Description::parse(submission.description).map_err(|e| {
            debug!(error = %e, "Submission rejected by validation");
            e
        })?;

        let verdict = self
            .classifier
            .classify(&description)
            .await
            .map_err(|e| {
                warn!(reason = %e.reason, "Classification failed");
                TriageError::from(e)
            })?;

        let issue = Issue::assemble(self.ids.next_id(), description, verdict, self.clock.now());
        tracing::Span::current().record("issue_id", tracing::field::display(issue.id()));
        info!(urgency = %issue.urgency_level(), "Issue created");
        Ok(issue)
    }
}

impl std::fmt::Debug for IssueFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssueFactory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        ClassificationFailed, IssueStatus, IssueStore, SequentialIdGenerator, Timestamp,
        UrgencyLevel, Verdict,
    };

    enum Behaviour {
        Answer(Verdict),
        Fail(&'static str),
        Hang,
    }

    struct StubClassifier {
        behaviour: Behaviour,
        calls: AtomicUsize,
    }

    impl StubClassifier {
        fn answering(urgency: &str, solutions: &str) -> Arc<Self> {
            Arc::new(Self {
                behaviour: Behaviour::Answer(Verdict {
                    urgency_level: UrgencyLevel::new(urgency).unwrap(),
                    suggested_solutions: solutions.to_string(),
                }),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(reason: &'static str) -> Arc<Self> {
            Arc::new(Self {
                behaviour: Behaviour::Fail(reason),
                calls: AtomicUsize::new(0),
            })
        }

        fn hanging() -> Arc<Self> {
            Arc::new(Self {
                behaviour: Behaviour::Hang,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Classifier for StubClassifier {
        async fn classify(&self, _: &Description) -> Result<Verdict, ClassificationFailed> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behaviour {
                Behaviour::Answer(v) => Ok(v.clone()),
                Behaviour::Fail(reason) => Err(ClassificationFailed::new(*reason)),
                Behaviour::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(ClassificationFailed::new("unreachable"))
                }
            }
        }
    }

    struct FixedClock(Timestamp);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            self.0
        }
    }

    fn fixed_time() -> Timestamp {
        Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap())
    }

    fn factory(classifier: Arc<StubClassifier>) -> IssueFactory {
        IssueFactory::with_capabilities(
            classifier,
            Arc::new(FixedClock(fixed_time())),
            Arc::new(SequentialIdGenerator::new()),
        )
    }

    #[tokio::test]
    async fn test_leaking_sink_scenario() {
        let stub = StubClassifier::answering("High", "Shut off the water valve and notify plumbing.");
        let factory = factory(stub.clone());

        let issue = factory
            .create_issue(Submission::new(
                "The sink in the 2nd floor bathroom is leaking.",
            ))
            .await
            .unwrap();

        assert_eq!(issue.status(), IssueStatus::Pending);
        assert_eq!(issue.urgency_level().as_str(), "High");
        assert_eq!(
            issue.suggested_solutions(),
            "Shut off the water valve and notify plumbing."
        );
        assert_eq!(
            issue.description().as_str(),
            "The sink in the 2nd floor bathroom is leaking."
        );
        assert!(!issue.id().to_string().is_empty());
        assert_eq!(issue.created_at(), fixed_time());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_short_descriptions_never_reach_the_classifier() {
        let stub = StubClassifier::answering("Low", "n/a");
        let factory = factory(stub.clone());

        for raw in ["", "too short", "    spaced    ", "\t\t\t\t\t\t\t\t\t\t\t"] {
            let err = factory.create_issue(Submission::new(raw)).await.unwrap_err();
            assert!(
                matches!(err, TriageError::ValidationFailed { .. }),
                "expected validation failure for {raw:?}, got {err:?}"
            );
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_classification_failure_is_propagated_unchanged() {
        let stub = StubClassifier::failing("schema mismatch: missing urgencyLevel");
        let factory = factory(stub.clone());
        let store = IssueStore::new();

        let result = factory
            .create_issue(Submission::new("Broken lock on the main gate."))
            .await;
        if let Ok(issue) = &result {
            store.insert(issue.clone());
        }

        assert_eq!(
            result.unwrap_err(),
            TriageError::ClassificationFailed(ClassificationFailed::new(
                "schema mismatch: missing urgencyLevel"
            ))
        );
        assert!(store.is_empty());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_ids_are_unique_across_calls() {
        let factory = IssueFactory::new(StubClassifier::answering("Medium", "Check it."));
        let mut seen = HashSet::new();
        for i in 0..50 {
            let issue = factory
                .create_issue(Submission::new(format!("Flickering light number {i}")))
                .await
                .unwrap();
            assert!(seen.insert(issue.id()));
        }
    }

    #[tokio::test]
    async fn test_unconventional_urgency_is_kept() {
        let factory = factory(StubClassifier::answering("Moderate", "Call facilities."));
        let issue = factory
            .create_issue(Submission::new("Door closer on room 4 is stiff."))
            .await
            .unwrap();
        assert_eq!(issue.urgency_level().as_str(), "Moderate");
        assert_eq!(issue.urgency_level().rank(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_classification_inserts_nothing() {
        let factory = factory(StubClassifier::hanging());
        let store = IssueStore::new();

        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            factory.create_issue(Submission::new("Elevator stuck between floors 2 and 3.")),
        )
        .await;

        assert!(outcome.is_err());
        assert!(store.list().is_empty());
    }
}
