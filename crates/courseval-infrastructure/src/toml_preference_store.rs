//! TOML-file-backed preference store.
//!
//! Reads preferences once at startup and caches them in memory; writes go
//! through the cache to the file. Last write wins.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

use courseval_core::error::{CoursevalError, Result};
use courseval_core::preference::{PreferenceStore, Preferences};

use crate::paths::CoursevalPaths;

/// Preference store backed by a single TOML file.
#[derive(Clone)]
pub struct TomlPreferenceStore {
    /// Cached preferences loaded from storage.
    preferences: Arc<Mutex<Preferences>>,
    path: PathBuf,
}

impl TomlPreferenceStore {
    /// Creates a store at the default location and loads the initial
    /// state. A missing file yields defaults rather than an error.
    pub async fn default_location() -> Result<Self> {
        let path = CoursevalPaths::preferences_file().map_err(|e| {
            CoursevalError::config(format!("Failed to get config directory: {}", e))
        })?;
        Self::new(path).await
    }

    /// Creates a store backed by the given file.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let initial = match fs::read_to_string(&path).await {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            preferences: Arc::new(Mutex::new(initial)),
            path,
        })
    }

    async fn persist(&self, preferences: Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let body = toml::to_string(&preferences)?;
        fs::write(&self.path, body).await?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for TomlPreferenceStore {
    async fn get(&self) -> Result<Preferences> {
        Ok(*self.preferences.lock().await)
    }

    async fn set(&self, preferences: Preferences) -> Result<()> {
        *self.preferences.lock().await = preferences;
        self.persist(preferences).await
    }

    async fn dark_mode(&self) -> bool {
        self.preferences.lock().await.dark_mode
    }

    async fn set_dark_mode(&self, enabled: bool) -> Result<()> {
        let snapshot = {
            let mut preferences = self.preferences.lock().await;
            preferences.dark_mode = enabled;
            *preferences
        };
        self.persist(snapshot).await
    }
}
