//! The search ranking function.
//!
//! `query` is a pure function over an immutable index: no side effects, no
//! hidden state, so identical inputs always produce identical ordered
//! results. All name normalization happens at index build; a query pays
//! only for its own normalization plus a scan of precomputed names, which
//! keeps tens-of-thousands-entity indexes well under interactive latency.

use crate::catalog::EntityKind;
use crate::search::index::{IndexedEntity, SearchIndex};
use crate::search::model::{Match, MatchResult, MatchScore, MatchTier, SearchDomain};
use crate::search::normalize::normalize;

/// Default number of matches returned to the search bar.
pub const DEFAULT_LIMIT: usize = 10;

/// Minimum score for resolving a review subject from free text: the query
/// must reach the prefix tier or better. Fuzzy containment is good enough
/// to suggest, not to silently bind a review to a subject.
pub const MIN_SUBJECT_SCORE: MatchScore = MatchScore {
    tier: MatchTier::Prefix,
    coverage: 0,
};

/// Runs a query against an index, returning up to `limit` ranked matches.
///
/// Empty or whitespace-only text yields an empty result, not an error.
/// Matches are ordered highest score first; exact score ties break on
/// display-name lexical order.
pub fn query(index: &SearchIndex, text: &str, limit: usize) -> MatchResult {
    let domain = match index.kind() {
        EntityKind::School => SearchDomain::Schools,
        EntityKind::Course => SearchDomain::Courses,
    };

    let norm_query = normalize(text);
    if norm_query.is_empty() {
        return MatchResult::empty(text, domain);
    }
    let query_tokens: Vec<&str> = norm_query.split_whitespace().collect();

    let mut matches: Vec<Match> = index
        .entries()
        .iter()
        .filter_map(|entry| {
            score_entry(entry, &norm_query, &query_tokens).map(|score| Match {
                entity: entry.entity().clone(),
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.entity.name.cmp(&b.entity.name))
    });

    let total_matches = matches.len();
    matches.truncate(limit);

    tracing::debug!(
        query = text,
        domain = ?domain,
        total_matches,
        returned = matches.len(),
        "search query executed"
    );

    MatchResult::new(text, domain, matches, total_matches)
}

/// Scores one entity against a normalized query, or excludes it.
///
/// Tiers, best first:
/// 1. exact equality with the primary or an alternate name;
/// 2. prefix of the primary or an alternate name, coverage = share of the
///    matched name the query spans;
/// 3. every query token contained somewhere in a single name, coverage =
///    share of that name the tokens account for.
fn score_entry(
    entry: &IndexedEntity,
    norm_query: &str,
    query_tokens: &[&str],
) -> Option<MatchScore> {
    if entry.search_names().any(|name| name == norm_query) {
        return Some(MatchScore::exact());
    }

    let best_prefix = entry
        .search_names()
        .filter(|name| name.starts_with(norm_query))
        .map(|name| coverage(norm_query.len(), name.len()))
        .max();
    if let Some(cov) = best_prefix {
        return Some(MatchScore::prefix(cov));
    }

    let token_len: usize = query_tokens.iter().map(|t| t.len()).sum();
    entry
        .search_names()
        .filter(|name| query_tokens.iter().all(|token| name.contains(token)))
        .map(|name| coverage(token_len, name.len()))
        .max()
        .map(MatchScore::fuzzy)
}

fn coverage(covered: usize, total: usize) -> u16 {
    if total == 0 {
        return 0;
    }
    let max = MatchScore::MAX_COVERAGE as usize;
    ((covered * max) / total).min(max) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Entity;

    fn school_index() -> SearchIndex {
        SearchIndex::build(
            EntityKind::School,
            vec![
                Entity::school("s1", "University of Nevada, Las Vegas").with_alt("UNLV"),
                Entity::school("s2", "University of Nevada, Reno").with_alt("UNR"),
                Entity::school("s3", "College of Southern Nevada").with_alt("CSN"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_display_name_ranks_first() {
        let result = query(&school_index(), "University of Nevada, Reno", 5);
        assert_eq!(result.top().unwrap().entity.id, "s2");
        assert_eq!(result.top().unwrap().score.tier, MatchTier::Exact);
    }

    #[test]
    fn test_exact_alternate_name_is_top_tier() {
        let result = query(&school_index(), "unlv", 5);
        assert_eq!(result.len(), 1);
        assert_eq!(result.top().unwrap().entity.id, "s1");
        assert_eq!(result.top().unwrap().score, MatchScore::exact());
    }

    #[test]
    fn test_prefix_match_ranks_below_exact() {
        let index = school_index();
        let result = query(&index, "university of nev", 5);
        // Both Nevada schools prefix-match; no exact match exists
        assert_eq!(result.len(), 2);
        for m in &result.matches {
            assert_eq!(m.score.tier, MatchTier::Prefix);
        }
        assert!(result.matches[0].score < MatchScore::exact());
    }

    #[test]
    fn test_prefix_coverage_favors_shorter_names() {
        // The same prefix covers more of the shorter name
        let result = query(&school_index(), "university of nevada", 5);
        assert_eq!(result.matches[0].entity.id, "s2"); // "... Reno" is shorter
        assert_eq!(result.matches[1].entity.id, "s1");
    }

    #[test]
    fn test_fuzzy_tokens_in_any_order() {
        let result = query(&school_index(), "vegas nevada", 5);
        assert_eq!(result.len(), 1);
        assert_eq!(result.top().unwrap().entity.id, "s1");
        assert_eq!(result.top().unwrap().score.tier, MatchTier::Fuzzy);
    }

    #[test]
    fn test_non_matching_entities_are_excluded() {
        let result = query(&school_index(), "harvard", 5);
        assert!(result.is_empty());
        assert_eq!(result.total_matches, 0);
    }

    #[test]
    fn test_empty_query_yields_empty_result() {
        for text in ["", "   ", "\t", "!!!"] {
            let result = query(&school_index(), text, 5);
            assert!(result.is_empty(), "query {text:?} should match nothing");
        }
    }

    #[test]
    fn test_limit_truncates_but_total_counts_all() {
        let result = query(&school_index(), "nevada", 1);
        assert_eq!(result.len(), 1);
        assert_eq!(result.total_matches, 3);
    }

    #[test]
    fn test_determinism() {
        let index = school_index();
        let a = query(&index, "nevada", 5);
        let b = query(&index, "nevada", 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_ties_break_on_display_name() {
        let index = SearchIndex::build(
            EntityKind::School,
            vec![
                Entity::school("s2", "College of Betas"),
                Entity::school("s1", "College of Alpha"),
            ],
        )
        .unwrap();

        // Identical tier and coverage for both names
        let result = query(&index, "college of", 5);
        assert_eq!(result.matches[0].entity.name, "College of Alpha");
        assert_eq!(result.matches[1].entity.name, "College of Betas");
        assert_eq!(result.matches[0].score, result.matches[1].score);
    }

    #[test]
    fn test_diacritics_fold_both_sides() {
        let index = SearchIndex::build(
            EntityKind::School,
            vec![Entity::school("s1", "Université de Montréal")],
        )
        .unwrap();

        let result = query(&index, "universite de montreal", 5);
        assert_eq!(result.top().unwrap().score, MatchScore::exact());
    }

    #[test]
    fn test_course_index_matches_catalog_code() {
        let index = SearchIndex::build(
            EntityKind::Course,
            vec![
                Entity::course("c1", "Computer Science I", "s1").with_alt("CS 135"),
                Entity::course("c2", "Calculus I", "s1").with_alt("MATH 181"),
            ],
        )
        .unwrap();

        let result = query(&index, "cs 135", 5);
        assert_eq!(result.len(), 1);
        assert_eq!(result.top().unwrap().entity.id, "c1");
        assert_eq!(result.top().unwrap().score, MatchScore::exact());
    }

    #[test]
    fn test_min_subject_score_admits_prefix_rejects_fuzzy() {
        let index = school_index();
        let prefix = query(&index, "university of nev", 1);
        assert!(prefix.top().unwrap().score >= MIN_SUBJECT_SCORE);

        let fuzzy = query(&index, "vegas nevada", 1);
        assert!(fuzzy.top().unwrap().score < MIN_SUBJECT_SCORE);
    }
}
