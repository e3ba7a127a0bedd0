//! Unified path management for courseval storage files.
//!
//! All courseval configuration and data files are resolved here, so every
//! store agrees on where things live across platforms (Linux, macOS,
//! Windows).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for courseval.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/courseval/          # Config directory
/// ├── catalog.toml              # School/course catalog snapshot
/// └── preferences.toml          # Presentation preferences
///
/// ~/.local/share/courseval/     # Data directory
/// ├── reviews/                  # One TOML file per submitted review
/// └── school_requests.json      # Filed school-addition requests
/// ```
pub struct CoursevalPaths;

impl CoursevalPaths {
    const APP_DIR: &'static str = "courseval";

    /// Returns the courseval configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the courseval data directory, used for per-record stores.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(Self::APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the catalog snapshot file.
    pub fn catalog_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("catalog.toml"))
    }

    /// Returns the path to the preferences file.
    pub fn preferences_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("preferences.toml"))
    }

    /// Returns the directory review records are stored in.
    pub fn reviews_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("reviews"))
    }

    /// Returns the path to the school-requests file.
    pub fn school_requests_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("school_requests.json"))
    }
}
