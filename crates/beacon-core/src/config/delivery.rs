//! Notification delivery configuration.

use serde::{Deserialize, Serialize};

/// Delivery pipeline defaults for notifications built from absent or
/// malformed push frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Application display name, used as the default notification title.
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Default notification body.
    #[serde(default = "default_body")]
    pub default_body: String,
    /// Default notification icon path.
    #[serde(default = "default_icon")]
    pub default_icon: String,
    /// Default notification badge path.
    #[serde(default = "default_badge")]
    pub default_badge: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            default_body: default_body(),
            default_icon: default_icon(),
            default_badge: default_badge(),
        }
    }
}

fn default_app_name() -> String {
    "Beacon".to_string()
}

fn default_body() -> String {
    "You have a new notification".to_string()
}

fn default_icon() -> String {
    "/icons/icon-192.png".to_string()
}

fn default_badge() -> String {
    "/icons/badge-72.png".to_string()
}
