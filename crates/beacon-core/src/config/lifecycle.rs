//! Lifecycle controller configuration.

use serde::{Deserialize, Serialize};

/// Settings for the versioned static resource cache managed by the
/// lifecycle controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Cache version identifier. Activation deletes every cache directory
    /// whose version does not match.
    #[serde(default = "default_version")]
    pub cache_version: String,
    /// Directory holding the static assets to pre-populate.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    /// Root directory for versioned cache directories.
    #[serde(default = "default_cache_root")]
    pub cache_root: String,
    /// Relative paths of the static assets to cache on install.
    #[serde(default = "default_manifest")]
    pub manifest: Vec<String>,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            cache_version: default_version(),
            assets_dir: default_assets_dir(),
            cache_root: default_cache_root(),
            manifest: default_manifest(),
        }
    }
}

fn default_version() -> String {
    format!("v{}", env!("CARGO_PKG_VERSION"))
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

fn default_cache_root() -> String {
    "data/cache".to_string()
}

fn default_manifest() -> Vec<String> {
    vec![
        "index.html".to_string(),
        "manifest.json".to_string(),
        "icons/icon-192.png".to_string(),
        "icons/badge-72.png".to_string(),
    ]
}
