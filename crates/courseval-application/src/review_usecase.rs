//! Review use case implementation.
//!
//! Owns the single active review session per interactive context and
//! coordinates subject resolution (via the search coordinator's snapshots)
//! with draft mutation and submission.

use std::sync::Arc;
use tokio::sync::Mutex;

use courseval_core::error::{CoursevalError, Result};
use courseval_core::review::{
    ReviewDetails, ReviewDraft, ReviewRecord, ReviewSession, ReviewSink, ReviewState,
};
use courseval_core::search::SearchIndex;

use crate::search_coordinator::SearchCoordinator;

/// Use case for composing and submitting reviews.
///
/// Exactly one session is active at a time: starting a new review replaces
/// any previous session (navigation-away semantics) unless a submission is
/// in flight, in which case the start is rejected: the draft must reach a
/// terminal outcome first. All session access is serialized through one
/// mutex, which also makes submission at-most-once per draft.
pub struct ReviewUseCase {
    coordinator: Arc<SearchCoordinator>,
    sink: Arc<dyn ReviewSink>,
    active: Mutex<Option<ReviewSession>>,
}

impl ReviewUseCase {
    /// Creates a new `ReviewUseCase`.
    pub fn new(coordinator: Arc<SearchCoordinator>, sink: Arc<dyn ReviewSink>) -> Self {
        Self {
            coordinator,
            sink,
            active: Mutex::new(None),
        }
    }

    /// Starts a review against a school resolved from free text.
    pub async fn start_school_review(&self, subject_query: &str) -> Result<()> {
        let index = self.coordinator.schools_index().await;
        self.start_with(&index, subject_query).await
    }

    /// Starts a review against a course resolved from free text.
    pub async fn start_course_review(&self, subject_query: &str) -> Result<()> {
        let index = self.coordinator.courses_index().await;
        self.start_with(&index, subject_query).await
    }

    async fn start_with(&self, index: &SearchIndex, subject_query: &str) -> Result<()> {
        let mut active = self.active.lock().await;
        if let Some(session) = active.as_ref() {
            if session.state() == ReviewState::Submitting {
                return Err(CoursevalError::invalid_state("start", session.state()));
            }
        }

        let session = ReviewSession::start(index, subject_query, self.sink.clone())?;
        if active.is_some() {
            tracing::debug!("replacing previous review session");
        }
        *active = Some(session);
        Ok(())
    }

    /// The state of the active session, if any.
    pub async fn state(&self) -> Option<ReviewState> {
        self.active.lock().await.as_ref().map(|s| s.state())
    }

    /// A copy of the active draft, for rendering.
    pub async fn draft(&self) -> Option<ReviewDraft> {
        self.active.lock().await.as_ref().map(|s| s.draft().clone())
    }

    /// Replaces the active draft's content.
    pub async fn set_content(&self, text: &str) -> Result<()> {
        let mut active = self.active.lock().await;
        Self::session_mut(&mut active, "set_content")?.set_content(text)
    }

    /// Sets or clears the active draft's instructor.
    pub async fn select_instructor(&self, instructor_id: Option<String>) -> Result<()> {
        let mut active = self.active.lock().await;
        Self::session_mut(&mut active, "select_instructor")?.select_instructor(instructor_id)
    }

    /// Replaces the active draft's questionnaire answers.
    pub async fn set_details(&self, details: ReviewDetails) -> Result<()> {
        let mut active = self.active.lock().await;
        Self::session_mut(&mut active, "set_details")?.set_details(details)
    }

    /// Submits the active draft.
    ///
    /// The session lock is held for the duration of the save, so a second
    /// submit cannot start while one is in flight.
    pub async fn submit(&self) -> Result<ReviewRecord> {
        let mut active = self.active.lock().await;
        Self::session_mut(&mut active, "submit")?.submit().await
    }

    /// Cancels and discards the active session. A no-op when none exists.
    pub async fn cancel(&self) -> Result<()> {
        let mut active = self.active.lock().await;
        match active.as_mut() {
            Some(session) => {
                session.cancel()?;
                *active = None;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn session_mut<'a>(
        active: &'a mut Option<ReviewSession>,
        operation: &str,
    ) -> Result<&'a mut ReviewSession> {
        active
            .as_mut()
            .ok_or_else(|| CoursevalError::invalid_state(operation, "no active session"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courseval_core::catalog::{Entity, EntityKind};
    use std::sync::Mutex as StdMutex;

    // Mock sink for testing
    struct MockSink {
        fail: StdMutex<bool>,
        saved: StdMutex<Vec<ReviewRecord>>,
    }

    impl MockSink {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fail: StdMutex::new(false),
                saved: StdMutex::new(Vec::new()),
            })
        }

        fn set_failing(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn saved(&self) -> Vec<ReviewRecord> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ReviewSink for MockSink {
        async fn save(&self, record: &ReviewRecord) -> Result<()> {
            if *self.fail.lock().unwrap() {
                return Err(CoursevalError::persistence(true, "store unavailable"));
            }
            self.saved.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn usecase_with(sink: Arc<MockSink>) -> ReviewUseCase {
        let schools = SearchIndex::build(
            EntityKind::School,
            vec![Entity::school("s1", "University of Nevada, Las Vegas").with_alt("UNLV")],
        )
        .unwrap();
        let courses = SearchIndex::build(
            EntityKind::Course,
            vec![Entity::course("c1", "Computer Science I", "s1").with_alt("CS 135")],
        )
        .unwrap();
        let coordinator = Arc::new(SearchCoordinator::new(schools, courses).unwrap());
        ReviewUseCase::new(coordinator, sink)
    }

    #[tokio::test]
    async fn test_full_submission_flow() {
        let sink = MockSink::new();
        let usecase = usecase_with(sink.clone());

        usecase.start_course_review("cs 135").await.unwrap();
        assert_eq!(usecase.state().await, Some(ReviewState::Drafting));

        usecase.set_content("Challenging but fair.").await.unwrap();
        usecase
            .select_instructor(Some("prof-1".to_string()))
            .await
            .unwrap();

        let record = usecase.submit().await.unwrap();
        assert_eq!(record.subject_id, "c1");
        assert_eq!(record.school_id.as_deref(), Some("s1"));
        assert_eq!(usecase.state().await, Some(ReviewState::Submitted));
        assert_eq!(sink.saved().len(), 1);
    }

    #[tokio::test]
    async fn test_start_unknown_subject_has_no_side_effects() {
        let sink = MockSink::new();
        let usecase = usecase_with(sink.clone());

        let err = usecase
            .start_school_review("nonexistent school xyz")
            .await
            .unwrap_err();
        assert!(err.is_subject_not_found());
        assert_eq!(usecase.state().await, None);
        assert!(sink.saved().is_empty());
    }

    #[tokio::test]
    async fn test_new_start_replaces_previous_session() {
        let usecase = usecase_with(MockSink::new());

        usecase.start_school_review("unlv").await.unwrap();
        usecase.set_content("draft one").await.unwrap();

        usecase.start_course_review("cs 135").await.unwrap();
        let draft = usecase.draft().await.unwrap();
        assert_eq!(draft.subject_id, "c1");
        assert!(draft.content.is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_then_retry() {
        let sink = MockSink::new();
        let usecase = usecase_with(sink.clone());

        usecase.start_school_review("unlv").await.unwrap();
        usecase.set_content("hello").await.unwrap();

        sink.set_failing(true);
        let err = usecase.submit().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(usecase.state().await, Some(ReviewState::Failed));

        // Rejected until the draft is touched again
        assert!(usecase.submit().await.unwrap_err().is_invalid_state());

        sink.set_failing(false);
        usecase.set_content("hello again").await.unwrap();
        usecase.submit().await.unwrap();
        assert_eq!(sink.saved().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_discards_session() {
        let usecase = usecase_with(MockSink::new());

        usecase.start_school_review("unlv").await.unwrap();
        usecase.cancel().await.unwrap();
        assert_eq!(usecase.state().await, None);

        // Idempotent with no active session
        usecase.cancel().await.unwrap();

        // Draft operations need a session again
        assert!(usecase.set_content("x").await.unwrap_err().is_invalid_state());
    }
}
