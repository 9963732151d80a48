//! Durable queue store configuration.

use serde::{Deserialize, Serialize};

/// Embedded durable queue store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite connection URL (e.g. `sqlite://data/beacon.db`).
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Queue entries older than this many days are purged by the daily
    /// maintenance job. This is the only retry ceiling: replay failures
    /// leave entries unmodified.
    #[serde(default = "default_max_entry_age_days")]
    pub max_entry_age_days: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            max_entry_age_days: default_max_entry_age_days(),
        }
    }
}

fn default_url() -> String {
    "sqlite://data/beacon.db".to_string()
}

fn default_max_connections() -> u32 {
    4
}

fn default_max_entry_age_days() -> u32 {
    30
}
