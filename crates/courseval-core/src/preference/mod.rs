//! Preference domain module.
//!
//! Process-wide presentation preferences (currently the dark-mode flag)
//! with an explicit external store: read once at startup, written on
//! toggle, last write wins.

mod model;
mod repository;

// Re-export public API
pub use model::Preferences;
pub use repository::PreferenceStore;
