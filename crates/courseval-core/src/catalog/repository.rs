//! Catalog boundary traits.
//!
//! Defines the interfaces through which the core obtains entity sets and
//! records school requests.

use super::model::{Entity, SchoolRequest};
use anyhow::Result;
use async_trait::async_trait;

/// A read interface yielding the complete current set of catalog entities.
///
/// Implementations load the full entity set for each kind; the caller builds
/// immutable search indexes from the result. Refresh cadence is the caller's
/// concern, not the source's.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Loads the complete current set of schools.
    async fn load_schools(&self) -> Result<Vec<Entity>>;

    /// Loads the complete current set of courses.
    async fn load_courses(&self) -> Result<Vec<Entity>>;
}

/// An abstract store for school-addition requests.
///
/// Decouples the request flow from the specific storage mechanism
/// (e.g., JSON file, database, remote API).
#[async_trait]
pub trait SchoolRequestRepository: Send + Sync {
    /// Records a school request.
    async fn submit(&self, request: &SchoolRequest) -> Result<()>;

    /// Lists all recorded requests.
    async fn list_all(&self) -> Result<Vec<SchoolRequest>>;
}
