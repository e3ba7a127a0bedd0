//! Preference store trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::preference::model::Preferences;

/// Key-value persistence for presentation preferences.
///
/// Last-write-wins; no other invariants.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Returns the current preferences.
    async fn get(&self) -> Result<Preferences>;

    /// Replaces the stored preferences.
    async fn set(&self, preferences: Preferences) -> Result<()>;

    /// Returns the dark-mode flag.
    async fn dark_mode(&self) -> bool;

    /// Sets the dark-mode flag.
    async fn set_dark_mode(&self, enabled: bool) -> Result<()>;
}
