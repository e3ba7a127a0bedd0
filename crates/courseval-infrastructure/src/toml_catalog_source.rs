//! TOML-file-backed entity source.
//!
//! Loads the complete school/course catalog from a single TOML snapshot
//! file. The file is replaced wholesale by whatever process syncs the
//! catalog; this source only reads.
//!
//! File format:
//!
//! ```toml
//! [[school]]
//! id = "…"
//! name = "University of Nevada, Las Vegas"
//! alt_names = ["UNLV"]
//!
//! [[course]]
//! id = "…"
//! name = "Computer Science I"
//! alt_names = ["CS 135"]
//! school_id = "…"
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use courseval_core::catalog::{Entity, EntitySource};

use crate::paths::CoursevalPaths;

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "school")]
    schools: Vec<SchoolEntry>,
    #[serde(default, rename = "course")]
    courses: Vec<CourseEntry>,
}

#[derive(Debug, Deserialize)]
struct SchoolEntry {
    id: String,
    name: String,
    #[serde(default)]
    alt_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CourseEntry {
    id: String,
    name: String,
    #[serde(default)]
    alt_names: Vec<String>,
    school_id: String,
}

/// Entity source reading a TOML catalog snapshot.
pub struct TomlCatalogSource {
    path: PathBuf,
}

impl TomlCatalogSource {
    /// Creates a source reading the given catalog file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a source at the default location (~/.config/courseval).
    pub fn default_location() -> Result<Self> {
        let path = CoursevalPaths::catalog_file()
            .map_err(|e| anyhow::anyhow!("Failed to get config directory: {}", e))?;
        Ok(Self::new(path))
    }

    async fn read(&self) -> Result<CatalogFile> {
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog file {}", self.path.display()))?;
        let catalog: CatalogFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file {}", self.path.display()))?;

        tracing::debug!(
            schools = catalog.schools.len(),
            courses = catalog.courses.len(),
            "loaded catalog snapshot"
        );

        Ok(catalog)
    }
}

#[async_trait]
impl EntitySource for TomlCatalogSource {
    async fn load_schools(&self) -> Result<Vec<Entity>> {
        let catalog = self.read().await?;
        Ok(catalog
            .schools
            .into_iter()
            .map(|entry| {
                let mut school = Entity::school(entry.id, entry.name);
                school.alt_names = entry.alt_names;
                school
            })
            .collect())
    }

    async fn load_courses(&self) -> Result<Vec<Entity>> {
        let catalog = self.read().await?;
        Ok(catalog
            .courses
            .into_iter()
            .map(|entry| {
                let mut course = Entity::course(entry.id, entry.name, entry.school_id);
                course.alt_names = entry.alt_names;
                course
            })
            .collect())
    }
}
