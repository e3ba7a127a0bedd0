//! Immutable search indexes.
//!
//! A `SearchIndex` is a kind-scoped snapshot of catalog entities with
//! normalized names precomputed at build time, so per-query work is limited
//! to scoring. Indexes are never mutated; a refresh builds a new index and
//! replaces the old one wholesale.

use crate::catalog::{Entity, EntityKind};
use crate::error::{CoursevalError, Result};
use crate::search::normalize::normalize;
use std::collections::HashSet;

/// An entity plus its precomputed normalized names.
#[derive(Debug, Clone)]
pub struct IndexedEntity {
    entity: Entity,
    norm_name: String,
    norm_alts: Vec<String>,
}

impl IndexedEntity {
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn norm_name(&self) -> &str {
        &self.norm_name
    }

    pub fn norm_alts(&self) -> &[String] {
        &self.norm_alts
    }

    /// All searchable normalized names: the primary name followed by
    /// alternates.
    pub fn search_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.norm_name.as_str()).chain(self.norm_alts.iter().map(String::as_str))
    }
}

/// Immutable, kind-scoped snapshot of entities for searching.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    kind: EntityKind,
    entries: Vec<IndexedEntity>,
}

impl SearchIndex {
    /// Builds an index from a complete entity set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntity` if any entity:
    /// - has an empty display name (or one with no searchable characters),
    /// - duplicates another entity's identifier,
    /// - does not match the index kind,
    /// - is a course without an owning school, or a school with one.
    ///
    /// On error no index is created.
    pub fn build(kind: EntityKind, entities: Vec<Entity>) -> Result<Self> {
        let mut seen_ids: HashSet<String> = HashSet::with_capacity(entities.len());
        let mut entries = Vec::with_capacity(entities.len());

        for entity in entities {
            if entity.id.trim().is_empty() {
                return Err(CoursevalError::invalid_entity(format!(
                    "{} '{}' has an empty identifier",
                    entity.kind, entity.name
                )));
            }
            if entity.name.trim().is_empty() {
                return Err(CoursevalError::invalid_entity(format!(
                    "{} '{}' has an empty display name",
                    entity.kind, entity.id
                )));
            }
            if !seen_ids.insert(entity.id.clone()) {
                return Err(CoursevalError::invalid_entity(format!(
                    "duplicate {} identifier '{}'",
                    entity.kind, entity.id
                )));
            }
            if entity.kind != kind {
                return Err(CoursevalError::invalid_entity(format!(
                    "entity '{}' is a {} in a {} index",
                    entity.id, entity.kind, kind
                )));
            }
            match (entity.kind, &entity.school_id) {
                (EntityKind::Course, None) => {
                    return Err(CoursevalError::invalid_entity(format!(
                        "course '{}' has no owning school",
                        entity.id
                    )));
                }
                (EntityKind::School, Some(_)) => {
                    return Err(CoursevalError::invalid_entity(format!(
                        "school '{}' must not reference a school",
                        entity.id
                    )));
                }
                _ => {}
            }

            let norm_name = normalize(&entity.name);
            if norm_name.is_empty() {
                return Err(CoursevalError::invalid_entity(format!(
                    "{} '{}' has no searchable characters in its name",
                    entity.kind, entity.id
                )));
            }
            let norm_alts = entity
                .alt_names
                .iter()
                .map(|alt| normalize(alt))
                .filter(|alt| !alt.is_empty())
                .collect();

            entries.push(IndexedEntity {
                entity,
                norm_name,
                norm_alts,
            });
        }

        tracing::debug!(kind = %kind, entities = entries.len(), "built search index");

        Ok(Self { kind, entries })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[IndexedEntity] {
        &self.entries
    }

    /// Looks up an entity by identifier.
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entries
            .iter()
            .map(IndexedEntity::entity)
            .find(|e| e.id == id)
    }
}
