//! The review session state machine.

use super::model::{MAX_CONTENT_LEN, ReviewDetails, ReviewDraft, ReviewRecord, ReviewState};
use super::repository::ReviewSink;
use crate::error::{CoursevalError, Result};
use crate::search::engine::{self, MIN_SUBJECT_SCORE};
use crate::search::index::SearchIndex;
use std::fmt;
use std::sync::Arc;

/// A short-lived state machine tracking one in-progress review.
///
/// Lifecycle:
///
/// ```text
/// Drafting -> Submitting -> Submitted            (terminal)
///                        -> Failed -> Drafting   (on next mutation)
/// Drafting | Failed -> Cancelled                 (terminal, idempotent)
/// ```
///
/// Submission is at-most-once per draft: `submit` is only accepted from
/// `Drafting`, so a failed attempt must be acknowledged by mutating the
/// draft (returning it to `Drafting`) before submitting again.
pub struct ReviewSession {
    draft: ReviewDraft,
    state: ReviewState,
    last_error: Option<CoursevalError>,
    sink: Arc<dyn ReviewSink>,
}

impl fmt::Debug for ReviewSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewSession")
            .field("state", &self.state)
            .field("draft", &self.draft)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl ReviewSession {
    /// Starts a session by resolving the subject from free text.
    ///
    /// The query is resolved against `index` with `limit = 1`; a match must
    /// reach [`MIN_SUBJECT_SCORE`] or the session is not created.
    ///
    /// # Errors
    ///
    /// Returns `SubjectNotFound` if nothing matches strongly enough.
    pub fn start(
        index: &SearchIndex,
        subject_query: &str,
        sink: Arc<dyn ReviewSink>,
    ) -> Result<Self> {
        let result = engine::query(index, subject_query, 1);
        let top = result
            .matches
            .into_iter()
            .next()
            .filter(|m| m.score >= MIN_SUBJECT_SCORE)
            .ok_or_else(|| CoursevalError::subject_not_found(subject_query))?;

        tracing::debug!(
            subject_id = %top.entity.id,
            subject = %top.entity.name,
            "review session started"
        );

        Ok(Self {
            draft: ReviewDraft::new(&top.entity),
            state: ReviewState::Drafting,
            last_error: None,
            sink,
        })
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn draft(&self) -> &ReviewDraft {
        &self.draft
    }

    /// The error retained from the last failed submission, if any.
    pub fn last_error(&self) -> Option<&CoursevalError> {
        self.last_error.as_ref()
    }

    /// Admits a draft mutation, moving a `Failed` session back to
    /// `Drafting` (clearing the retained error).
    fn ensure_mutable(&mut self, operation: &str) -> Result<()> {
        match self.state {
            ReviewState::Drafting => Ok(()),
            ReviewState::Failed => {
                self.state = ReviewState::Drafting;
                self.last_error = None;
                Ok(())
            }
            other => Err(CoursevalError::invalid_state(operation, other)),
        }
    }

    /// Replaces the draft content.
    ///
    /// # Errors
    ///
    /// Returns `ContentTooLong` beyond [`MAX_CONTENT_LEN`] characters; the
    /// draft and state are unchanged. Returns `InvalidState` outside
    /// `Drafting`/`Failed`.
    pub fn set_content(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        let len = text.chars().count();
        if len > MAX_CONTENT_LEN {
            return Err(CoursevalError::content_too_long(len, MAX_CONTENT_LEN));
        }
        self.ensure_mutable("set_content")?;
        self.draft.content = text;
        Ok(())
    }

    /// Sets or clears the instructor selection.
    pub fn select_instructor(&mut self, instructor_id: Option<String>) -> Result<()> {
        self.ensure_mutable("select_instructor")?;
        self.draft.instructor_id = instructor_id;
        Ok(())
    }

    /// Replaces the questionnaire answers.
    pub fn set_details(&mut self, details: ReviewDetails) -> Result<()> {
        self.ensure_mutable("set_details")?;
        self.draft.details = details;
        Ok(())
    }

    /// Submits the draft to the persistence sink.
    ///
    /// Only valid from `Drafting`. On success the session is `Submitted`
    /// and the persisted record is returned; on failure the session is
    /// `Failed` with the error retained for inspection, and a mutation is
    /// required before the next attempt.
    pub async fn submit(&mut self) -> Result<ReviewRecord> {
        if self.state != ReviewState::Drafting {
            return Err(CoursevalError::invalid_state("submit", self.state));
        }
        self.state = ReviewState::Submitting;

        let record = self.draft.to_record();
        match self.sink.save(&record).await {
            Ok(()) => {
                self.state = ReviewState::Submitted;
                tracing::debug!(record_id = %record.id, "review submitted");
                Ok(record)
            }
            Err(err) => {
                tracing::error!(error = %err, "review submission failed");
                self.state = ReviewState::Failed;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Cancels the session, discarding the draft.
    ///
    /// Valid from `Drafting` and `Failed`; idempotent when already
    /// `Cancelled`. An in-flight or completed submission cannot be
    /// cancelled.
    pub fn cancel(&mut self) -> Result<()> {
        match self.state {
            ReviewState::Drafting | ReviewState::Failed | ReviewState::Cancelled => {
                self.state = ReviewState::Cancelled;
                self.last_error = None;
                Ok(())
            }
            other => Err(CoursevalError::invalid_state("cancel", other)),
        }
    }
}
