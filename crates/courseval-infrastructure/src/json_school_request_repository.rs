//! JSON-file-backed school request store.
//!
//! School-addition requests accumulate in a single JSON document; the list
//! is small and processed by hand, so a flat file is enough.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use courseval_core::catalog::{SchoolRequest, SchoolRequestRepository};

use crate::paths::CoursevalPaths;

/// School request store backed by a single JSON file.
pub struct JsonSchoolRequestRepository {
    path: PathBuf,
}

impl JsonSchoolRequestRepository {
    /// Creates a repository at the default location.
    pub fn default_location() -> Result<Self> {
        let path = CoursevalPaths::school_requests_file()
            .map_err(|e| anyhow::anyhow!("Failed to get data directory: {}", e))?;
        Ok(Self::new(path))
    }

    /// Creates a repository backed by the given file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn read_all(&self) -> Result<Vec<SchoolRequest>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read school requests {}", self.path.display())
                });
            }
        };
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse school requests {}", self.path.display()))
    }

    async fn write_all(&self, requests: &[SchoolRequest]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .context("Failed to create data directory")?;
        }
        let body =
            serde_json::to_string_pretty(requests).context("Failed to encode school requests")?;
        fs::write(&self.path, body)
            .await
            .context("Failed to write school requests")?;
        Ok(())
    }
}

#[async_trait]
impl SchoolRequestRepository for JsonSchoolRequestRepository {
    async fn submit(&self, request: &SchoolRequest) -> Result<()> {
        let mut requests = self.read_all().await?;
        requests.push(request.clone());
        self.write_all(&requests).await
    }

    async fn list_all(&self) -> Result<Vec<SchoolRequest>> {
        self.read_all().await
    }
}
