//! Catalog domain models.
//!
//! The catalog holds every subject a user can search for and review:
//! schools and the courses they offer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of a searchable subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    School,
    Course,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::School => "school",
            Self::Course => "course",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A searchable subject: a school or a course.
///
/// An entity carries:
/// - A stable unique identifier (UUID format, unique within its kind)
/// - A display name (e.g. "University of Nevada, Las Vegas")
/// - Alternate names and abbreviations (e.g. "UNLV"; for courses, the
///   catalog code such as "CS 135")
/// - For courses, the identifier of the owning school
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique entity identifier (UUID format)
    pub id: String,
    /// Entity kind
    pub kind: EntityKind,
    /// Human-readable display name
    pub name: String,
    /// Alternate names and abbreviations matched by search
    #[serde(default)]
    pub alt_names: Vec<String>,
    /// Owning school identifier. Required for courses; must be absent for
    /// schools. Enforced at index build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
}

impl Entity {
    /// Creates a school entity.
    pub fn school(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::School,
            name: name.into(),
            alt_names: Vec::new(),
            school_id: None,
        }
    }

    /// Creates a course entity owned by the given school.
    pub fn course(
        id: impl Into<String>,
        name: impl Into<String>,
        school_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: EntityKind::Course,
            name: name.into(),
            alt_names: Vec::new(),
            school_id: Some(school_id.into()),
        }
    }

    /// Adds an alternate name.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt_names.push(alt.into());
        self
    }
}

/// A request to add a missing school to the catalog.
///
/// Users whose school is not yet indexed can file a request; requests are
/// processed out of band by catalog maintainers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRequest {
    /// Name of the school being requested
    pub school_name: String,
    /// School website, if the requester provided one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Timestamp when the request was filed (RFC 3339 format)
    pub requested_at: String,
}

impl SchoolRequest {
    /// Creates a new request stamped with the current time.
    pub fn new(school_name: impl Into<String>, website: Option<String>) -> Self {
        Self {
            school_name: school_name.into(),
            website,
            requested_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_school_constructor() {
        let school = Entity::school("id-1", "University of Nevada, Las Vegas").with_alt("UNLV");
        assert_eq!(school.kind, EntityKind::School);
        assert_eq!(school.alt_names, vec!["UNLV".to_string()]);
        assert!(school.school_id.is_none());
    }

    #[test]
    fn test_course_constructor() {
        let course = Entity::course("id-2", "Computer Science I", "id-1").with_alt("CS 135");
        assert_eq!(course.kind, EntityKind::Course);
        assert_eq!(course.school_id.as_deref(), Some("id-1"));
    }

    #[test]
    fn test_school_request_is_stamped() {
        let request = SchoolRequest::new("Test University", None);
        assert!(!request.requested_at.is_empty());
    }
}
