//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod backend;
pub mod delivery;
pub mod lifecycle;
pub mod logging;
pub mod server;
pub mod store;
pub mod sync;

use serde::{Deserialize, Serialize};

pub use self::backend::BackendConfig;
pub use self::delivery::DeliveryConfig;
pub use self::lifecycle::LifecycleConfig;
pub use self::logging::LoggingConfig;
pub use self::server::ServerConfig;
pub use self::store::StoreConfig;
pub use self::sync::SyncConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Durable queue store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Backend endpoint settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Notification delivery settings.
    #[serde(default)]
    pub delivery: DeliveryConfig,
    /// Lifecycle controller settings.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    /// Sync reconciler settings.
    #[serde(default)]
    pub sync: SyncConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `BEACON__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("BEACON")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            backend: BackendConfig::default(),
            delivery: DeliveryConfig::default(),
            lifecycle: LifecycleConfig::default(),
            sync: SyncConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
