use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Immutable runtime configuration for the shell.
///
/// Loaded once at startup by the config provider and passed by reference
/// into every component that needs it; there is no ambient global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host of the hosted web application. Navigations to this host stay
    /// in-surface; a popup navigating here signals auth completion.
    pub allowed_host: String,
    /// Start URL loaded into the primary surface at launch.
    pub start_url: String,
    pub pull_to_refresh_enabled: bool,
    pub file_uploads_enabled: bool,
    pub multiple_uploads_enabled: bool,
    /// Permission names requested once at launch (e.g. "notifications").
    pub permissions_on_launch: BTreeSet<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_host: "app.example.com".to_string(),
            start_url: "https://app.example.com/".to_string(),
            pull_to_refresh_enabled: true,
            file_uploads_enabled: true,
            multiple_uploads_enabled: true,
            permissions_on_launch: BTreeSet::new(),
        }
    }
}

impl Config {
    /// Effective multi-select limit for a file-picker request: the caller's
    /// `allow_multiple` flag is honored only when multi-uploads are enabled.
    pub fn selection_limit(&self, allow_multiple: bool) -> usize {
        if allow_multiple && self.multiple_uploads_enabled {
            usize::MAX
        } else {
            1
        }
    }
}
