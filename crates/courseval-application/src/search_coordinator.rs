//! Search coordination: domain selection, atomic index refresh, and
//! stale-response suppression.
//!
//! The search bar issues queries in rapid succession as the user types, and
//! completions may arrive out of order. The coordinator stamps every query
//! with a monotonically increasing generation; a result is applied to the
//! visible slot only if its generation is still the latest issued, so the
//! UI can never observe an older query's result after a newer one was
//! requested (last-result-wins).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use courseval_core::catalog::{EntityKind, EntitySource};
use courseval_core::error::{CoursevalError, Result};
use courseval_core::search::{self, Match, MatchResult, SearchDomain, SearchIndex};

/// Identifies one issued query for stale-result detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTicket {
    generation: u64,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

struct VisibleResult {
    generation: u64,
    result: MatchResult,
}

/// Owns the per-kind index snapshots and the visible search result.
///
/// Indexes are `Arc` snapshots behind an `RwLock`: a refresh builds the new
/// indexes completely, then swaps the `Arc`s, so queries in flight keep the
/// snapshot they started with and never observe a partially-built index.
pub struct SearchCoordinator {
    schools: RwLock<Arc<SearchIndex>>,
    courses: RwLock<Arc<SearchIndex>>,
    /// Generation of the most recently issued query.
    issued: AtomicU64,
    visible: RwLock<Option<VisibleResult>>,
}

impl SearchCoordinator {
    /// Creates a coordinator from prebuilt indexes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntity` if an index is passed in the wrong position.
    pub fn new(schools: SearchIndex, courses: SearchIndex) -> Result<Self> {
        if schools.kind() != EntityKind::School {
            return Err(CoursevalError::invalid_entity(
                "schools index does not hold schools",
            ));
        }
        if courses.kind() != EntityKind::Course {
            return Err(CoursevalError::invalid_entity(
                "courses index does not hold courses",
            ));
        }
        Ok(Self {
            schools: RwLock::new(Arc::new(schools)),
            courses: RwLock::new(Arc::new(courses)),
            issued: AtomicU64::new(0),
            visible: RwLock::new(None),
        })
    }

    /// Creates a coordinator by loading and indexing both entity sets.
    pub async fn from_source(source: &dyn EntitySource) -> Result<Self> {
        let (schools, courses) = Self::build_indexes(source).await?;
        Self::new(schools, courses)
    }

    async fn build_indexes(source: &dyn EntitySource) -> Result<(SearchIndex, SearchIndex)> {
        let schools = source.load_schools().await?;
        let schools = SearchIndex::build(EntityKind::School, schools)?;
        let courses = source.load_courses().await?;
        let courses = SearchIndex::build(EntityKind::Course, courses)?;
        Ok((schools, courses))
    }

    /// Rebuilds both indexes from the source and swaps them in atomically.
    ///
    /// On error the previous snapshots remain in place.
    pub async fn refresh(&self, source: &dyn EntitySource) -> Result<()> {
        let (schools, courses) = Self::build_indexes(source).await?;
        *self.schools.write().await = Arc::new(schools);
        *self.courses.write().await = Arc::new(courses);
        tracing::debug!("search indexes refreshed");
        Ok(())
    }

    /// Returns the current school index snapshot.
    pub async fn schools_index(&self) -> Arc<SearchIndex> {
        self.schools.read().await.clone()
    }

    /// Returns the current course index snapshot.
    pub async fn courses_index(&self) -> Arc<SearchIndex> {
        self.courses.read().await.clone()
    }

    /// Issues a ticket for a new query, superseding all earlier tickets.
    pub fn issue(&self) -> QueryTicket {
        QueryTicket {
            generation: self.issued.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Runs a query against the current snapshots without touching the
    /// visible slot.
    pub async fn execute(&self, domain: SearchDomain, text: &str, limit: usize) -> MatchResult {
        match domain {
            SearchDomain::Schools => {
                let index = self.schools_index().await;
                search::query(&index, text, limit)
            }
            SearchDomain::Courses => {
                let index = self.courses_index().await;
                search::query(&index, text, limit)
            }
            SearchDomain::All => {
                let schools_index = self.schools_index().await;
                let courses_index = self.courses_index().await;
                let schools = search::query(&schools_index, text, limit);
                let courses = search::query(&courses_index, text, limit);
                merge(text, schools, courses, limit)
            }
        }
    }

    /// Applies a completed query's result to the visible slot.
    ///
    /// Returns the result if it was applied, or `None` if the ticket was
    /// superseded and the arrival discarded.
    pub async fn apply(&self, ticket: QueryTicket, result: MatchResult) -> Option<MatchResult> {
        if ticket.generation != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(
                generation = ticket.generation,
                "discarding stale search result"
            );
            return None;
        }
        let mut visible = self.visible.write().await;
        // A newer arrival may have won the lock between the check and here
        if visible
            .as_ref()
            .is_some_and(|v| v.generation > ticket.generation)
        {
            return None;
        }
        *visible = Some(VisibleResult {
            generation: ticket.generation,
            result: result.clone(),
        });
        Some(result)
    }

    /// Issues, executes, and applies in one call.
    pub async fn query(
        &self,
        domain: SearchDomain,
        text: &str,
        limit: usize,
    ) -> Option<MatchResult> {
        let ticket = self.issue();
        let result = self.execute(domain, text, limit).await;
        self.apply(ticket, result).await
    }

    /// The result the presentation layer should currently render.
    pub async fn visible(&self) -> Option<MatchResult> {
        self.visible
            .read()
            .await
            .as_ref()
            .map(|v| v.result.clone())
    }
}

/// Merges two per-kind results into one ranked `All`-domain result.
fn merge(
    text: &str,
    schools: MatchResult,
    courses: MatchResult,
    limit: usize,
) -> MatchResult {
    let total_matches = schools.total_matches + courses.total_matches;
    let mut matches: Vec<Match> = schools.matches;
    matches.extend(courses.matches);
    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.entity.name.cmp(&b.entity.name))
    });
    matches.truncate(limit);
    MatchResult::new(text, SearchDomain::All, matches, total_matches)
}
