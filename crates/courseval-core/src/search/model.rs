//! Search result and scoring models.

use crate::catalog::Entity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which part of the catalog a query targets.
///
/// Generalizes the search bar's school/course mode flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDomain {
    /// Search schools only
    Schools,
    /// Search courses only
    Courses,
    /// Search both, merged by score
    All,
}

impl Default for SearchDomain {
    fn default() -> Self {
        Self::All
    }
}

/// Match quality tier. `Exact` outranks `Prefix`, which outranks `Fuzzy`,
/// regardless of coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    /// Query equals the primary or an alternate name
    Exact,
    /// Query is a prefix of the primary or an alternate name
    Prefix,
    /// Every query token appears somewhere within a name
    Fuzzy,
}

impl MatchTier {
    /// Numeric rank; the single place tier ordering is defined.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Exact => 3,
            Self::Prefix => 2,
            Self::Fuzzy => 1,
        }
    }
}

impl Ord for MatchTier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for MatchTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Score of a single match: tier first, then coverage.
///
/// Coverage is an integer per-mille ratio (0..=1000) of how much of the
/// matched name the query accounts for. Integer coverage keeps the ordering
/// total, so identical inputs always rank identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub tier: MatchTier,
    pub coverage: u16,
}

impl MatchScore {
    /// Full coverage, in per-mille.
    pub const MAX_COVERAGE: u16 = 1000;

    pub const fn exact() -> Self {
        Self {
            tier: MatchTier::Exact,
            coverage: Self::MAX_COVERAGE,
        }
    }

    pub const fn prefix(coverage: u16) -> Self {
        Self {
            tier: MatchTier::Prefix,
            coverage,
        }
    }

    pub const fn fuzzy(coverage: u16) -> Self {
        Self {
            tier: MatchTier::Fuzzy,
            coverage,
        }
    }
}

impl Ord for MatchScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tier
            .cmp(&other.tier)
            .then_with(|| self.coverage.cmp(&other.coverage))
    }
}

impl PartialOrd for MatchScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single ranked match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub entity: Entity,
    pub score: MatchScore,
}

/// Result of a search: matches ordered highest score first, ties broken by
/// display-name lexical order. Produced fresh per query; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The query text as entered
    pub query: String,

    /// The domain the query ran against
    pub domain: SearchDomain,

    /// Ranked matches, truncated to the caller's limit
    pub matches: Vec<Match>,

    /// Total number of matches before truncation
    pub total_matches: usize,
}

impl MatchResult {
    /// Creates a new empty result.
    pub fn empty(query: impl Into<String>, domain: SearchDomain) -> Self {
        Self {
            query: query.into(),
            domain,
            matches: Vec::new(),
            total_matches: 0,
        }
    }

    /// Creates a new result with matches.
    pub fn new(
        query: impl Into<String>,
        domain: SearchDomain,
        matches: Vec<Match>,
        total_matches: usize,
    ) -> Self {
        Self {
            query: query.into(),
            domain,
            matches,
            total_matches,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// The best match, if any.
    pub fn top(&self) -> Option<&Match> {
        self.matches.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(MatchTier::Exact > MatchTier::Prefix);
        assert!(MatchTier::Prefix > MatchTier::Fuzzy);
    }

    #[test]
    fn test_tier_outranks_coverage() {
        // Any prefix score beats any fuzzy score
        assert!(MatchScore::prefix(1) > MatchScore::fuzzy(MatchScore::MAX_COVERAGE));
        assert!(MatchScore::exact() > MatchScore::prefix(MatchScore::MAX_COVERAGE));
    }

    #[test]
    fn test_coverage_orders_within_tier() {
        assert!(MatchScore::fuzzy(700) > MatchScore::fuzzy(300));
    }
}
