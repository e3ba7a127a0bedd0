//! Preference domain model.

use serde::{Deserialize, Serialize};

/// Presentation preferences that persist across restarts.
///
/// Purely advisory state consumed by the presentation layer; the search and
/// review core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the dark color scheme is enabled.
    #[serde(default)]
    pub dark_mode: bool,
}

impl Preferences {
    /// Creates preferences with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let preferences = Preferences::default();
        assert!(!preferences.dark_mode);
    }
}
