//! Directory-backed review record store.
//!
//! Stores each submitted review as its own TOML file, keyed by record id.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! └── reviews/
//!     ├── <record-id-1>.toml
//!     └── <record-id-2>.toml
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use courseval_core::error::{CoursevalError, Result};
use courseval_core::review::{ReviewRecord, ReviewSink};

use crate::paths::CoursevalPaths;

/// File-per-record review store.
///
/// Implements [`ReviewSink`] for submissions and offers read access for the
/// surrounding product (review listings). Save failures are reported as
/// `Persistence`: write errors are retryable (transient filesystem
/// conditions), encoding errors are not.
pub struct AsyncDirReviewRepository {
    reviews_dir: PathBuf,
}

impl AsyncDirReviewRepository {
    /// Creates a repository at the default location
    /// (~/.local/share/courseval/reviews).
    pub async fn default_location() -> Result<Self> {
        let reviews_dir = CoursevalPaths::reviews_dir()
            .map_err(|e| CoursevalError::config(format!("Failed to get data directory: {}", e)))?;
        Self::new(reviews_dir).await
    }

    /// Creates a repository rooted at the given directory.
    pub async fn new(reviews_dir: impl AsRef<Path>) -> Result<Self> {
        let reviews_dir = reviews_dir.as_ref().to_path_buf();
        fs::create_dir_all(&reviews_dir).await?;
        Ok(Self { reviews_dir })
    }

    fn record_path(&self, record_id: &str) -> PathBuf {
        self.reviews_dir.join(format!("{record_id}.toml"))
    }

    /// Finds a record by its ID.
    pub async fn find_by_id(&self, record_id: &str) -> Result<Option<ReviewRecord>> {
        match fs::read_to_string(self.record_path(record_id)).await {
            Ok(content) => Ok(Some(toml::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all stored records, most recent first.
    ///
    /// Unreadable files are skipped with a warning rather than failing the
    /// whole listing.
    pub async fn list_all(&self) -> Result<Vec<ReviewRecord>> {
        let mut records = Vec::new();
        let mut entries = fs::read_dir(&self.reviews_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }
            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable review file");
                    continue;
                }
            };
            match toml::from_str::<ReviewRecord>(&content) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping malformed review file");
                }
            }
        }

        // RFC 3339 strings sort chronologically
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }

    /// Deletes a record. Deleting a missing record is not an error.
    pub async fn delete(&self, record_id: &str) -> Result<()> {
        match fs::remove_file(self.record_path(record_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ReviewSink for AsyncDirReviewRepository {
    async fn save(&self, record: &ReviewRecord) -> Result<()> {
        let body = toml::to_string_pretty(record).map_err(|e| {
            CoursevalError::persistence(
                false,
                format!("failed to encode review {}: {}", record.id, e),
            )
        })?;

        fs::create_dir_all(&self.reviews_dir).await.map_err(|e| {
            CoursevalError::persistence(true, format!("failed to create review directory: {}", e))
        })?;

        fs::write(self.record_path(&record.id), body)
            .await
            .map_err(|e| {
                CoursevalError::persistence(
                    true,
                    format!("failed to write review {}: {}", record.id, e),
                )
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courseval_core::review::{DeliveryMethod, Grade, ReviewDetails, Term};
    use tempfile::TempDir;

    fn create_test_record(id: &str, created_at: &str) -> ReviewRecord {
        ReviewRecord {
            id: id.to_string(),
            subject_id: "c1".to_string(),
            school_id: Some("s1".to_string()),
            instructor_id: Some("prof-1".to_string()),
            content: "This is a sample review.".to_string(),
            created_at: created_at.to_string(),
            details: ReviewDetails {
                term: Some(Term::Spring),
                grade_received: Some(Grade::A),
                delivery_method: Some(DeliveryMethod::Online),
                year_taken: Some(2023),
                textbook_required: Some(false),
                recommended: Some(true),
            },
        }
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repository = AsyncDirReviewRepository::new(temp_dir.path().join("reviews"))
            .await
            .unwrap();

        let record = create_test_record("review-1", "2024-01-01T00:00:00+00:00");
        repository.save(&record).await.unwrap();

        let loaded = repository.find_by_id("review-1").await.unwrap().unwrap();
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_list_all_sorts_most_recent_first() {
        let temp_dir = TempDir::new().unwrap();
        let repository = AsyncDirReviewRepository::new(temp_dir.path().join("reviews"))
            .await
            .unwrap();

        repository
            .save(&create_test_record("review-1", "2024-01-01T00:00:00+00:00"))
            .await
            .unwrap();
        repository
            .save(&create_test_record("review-2", "2024-03-01T00:00:00+00:00"))
            .await
            .unwrap();
        repository
            .save(&create_test_record("review-3", "2024-02-01T00:00:00+00:00"))
            .await
            .unwrap();

        let records = repository.list_all().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "review-2");
        assert_eq!(records[2].id, "review-1");
    }

    #[tokio::test]
    async fn test_list_all_skips_malformed_files() {
        let temp_dir = TempDir::new().unwrap();
        let reviews_dir = temp_dir.path().join("reviews");
        let repository = AsyncDirReviewRepository::new(&reviews_dir).await.unwrap();

        repository
            .save(&create_test_record("review-1", "2024-01-01T00:00:00+00:00"))
            .await
            .unwrap();
        fs::write(reviews_dir.join("broken.toml"), "not = [valid")
            .await
            .unwrap();

        let records = repository.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let repository = AsyncDirReviewRepository::new(temp_dir.path().join("reviews"))
            .await
            .unwrap();

        let record = create_test_record("to-delete", "2024-01-01T00:00:00+00:00");
        repository.save(&record).await.unwrap();
        assert!(repository.find_by_id("to-delete").await.unwrap().is_some());

        repository.delete("to-delete").await.unwrap();
        assert!(repository.find_by_id("to-delete").await.unwrap().is_none());

        // Deleting again is fine
        repository.delete("to-delete").await.unwrap();
    }

    #[tokio::test]
    async fn test_find_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let repository = AsyncDirReviewRepository::new(temp_dir.path().join("reviews"))
            .await
            .unwrap();

        assert!(repository.find_by_id("nonexistent").await.unwrap().is_none());
    }
}
