//! Search domain module.
//!
//! Incremental search over catalog entities: normalization, immutable
//! per-snapshot indexes with precomputed normalized names, and a pure,
//! tiered ranking function.
//!
//! # Module Structure
//!
//! - `model`: Result and scoring types (`SearchDomain`, `MatchTier`,
//!   `MatchScore`, `Match`, `MatchResult`)
//! - `normalize`: Query/name text normalization
//! - `index`: `SearchIndex` construction and validation
//! - `engine`: The ranking function (`query`)

pub mod engine;
pub mod index;
pub mod model;
pub mod normalize;

// Re-export public API
pub use engine::{DEFAULT_LIMIT, MIN_SUBJECT_SCORE, query};
pub use index::{IndexedEntity, SearchIndex};
pub use model::{Match, MatchResult, MatchScore, MatchTier, SearchDomain};
pub use normalize::normalize;
