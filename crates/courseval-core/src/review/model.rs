//! Review domain models.

use crate::catalog::Entity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum review content length, in characters.
pub const MAX_CONTENT_LEN: usize = 500;

/// Term in which the reviewed course was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    Spring,
    Summer,
    Fall,
}

/// Grade the reviewer received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// How the reviewer took the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMethod {
    Online,
    #[serde(rename = "In Person")]
    InPerson,
    Hybrid,
}

/// Optional questionnaire fields accompanying the free-text content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<Term>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_received: Option<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_method: Option<DeliveryMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_taken: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub textbook_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
}

/// Lifecycle state of a review session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    /// The draft is open for mutation
    Drafting,
    /// A submission is in flight; no other action is accepted
    Submitting,
    /// Terminal: the record was persisted
    Submitted,
    /// The sink rejected the submission; mutation returns to `Drafting`
    Failed,
    /// Terminal: the draft was discarded
    Cancelled,
}

impl ReviewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drafting => "drafting",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted | Self::Cancelled)
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress, uncommitted review content tied to one subject.
///
/// Owned exclusively by the single active `ReviewSession`; destroyed when
/// the session ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDraft {
    /// Identifier of the subject under review
    pub subject_id: String,
    /// Display name of the subject, for presentation
    pub subject_name: String,
    /// Owning school, when the subject is a course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
    /// Selected instructor, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    /// Free-text content (possibly empty)
    pub content: String,
    /// Questionnaire answers
    #[serde(default)]
    pub details: ReviewDetails,
}

impl ReviewDraft {
    /// Creates an empty draft against a resolved subject.
    pub fn new(subject: &Entity) -> Self {
        Self {
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            school_id: subject.school_id.clone(),
            instructor_id: None,
            content: String::new(),
            details: ReviewDetails::default(),
        }
    }

    /// Freezes the draft into a record with a fresh identifier and
    /// creation timestamp.
    pub fn to_record(&self) -> ReviewRecord {
        ReviewRecord {
            id: uuid::Uuid::new_v4().to_string(),
            subject_id: self.subject_id.clone(),
            school_id: self.school_id.clone(),
            instructor_id: self.instructor_id.clone(),
            content: self.content.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            details: self.details,
        }
    }
}

/// The immutable artifact produced on successful submission.
///
/// Ownership passes to the persistence collaborator once created; the core
/// never mutates it afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Unique record identifier (UUID format)
    pub id: String,
    /// Identifier of the reviewed subject
    pub subject_id: String,
    /// Owning school, when the subject is a course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
    /// Instructor the review concerns, if one was selected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<String>,
    /// Free-text content
    pub content: String,
    /// Timestamp when the record was created (RFC 3339 format)
    pub created_at: String,
    /// Questionnaire answers
    #[serde(default)]
    pub details: ReviewDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_starts_empty() {
        let subject = Entity::course("c1", "Computer Science I", "s1");
        let draft = ReviewDraft::new(&subject);
        assert_eq!(draft.subject_id, "c1");
        assert_eq!(draft.school_id.as_deref(), Some("s1"));
        assert!(draft.content.is_empty());
        assert!(draft.instructor_id.is_none());
        assert_eq!(draft.details, ReviewDetails::default());
    }

    #[test]
    fn test_records_get_unique_ids() {
        let subject = Entity::school("s1", "Alpha University");
        let draft = ReviewDraft::new(&subject);
        let a = draft.to_record();
        let b = draft.to_record();
        assert_ne!(a.id, b.id);
        assert_eq!(a.subject_id, b.subject_id);
    }

    #[test]
    fn test_grade_serde_names() {
        let json = serde_json::to_string(&Grade::BPlus).unwrap();
        assert_eq!(json, "\"B+\"");
        let grade: Grade = serde_json::from_str("\"N/A\"").unwrap();
        assert_eq!(grade, Grade::NotApplicable);
    }

    #[test]
    fn test_terminal_states() {
        assert!(ReviewState::Submitted.is_terminal());
        assert!(ReviewState::Cancelled.is_terminal());
        assert!(!ReviewState::Drafting.is_terminal());
        assert!(!ReviewState::Failed.is_terminal());
    }
}
