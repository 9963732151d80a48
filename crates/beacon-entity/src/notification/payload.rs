//! Push notification payload model.
//!
//! A push frame arrives from the backend as an optional JSON body. Any
//! field it carries overrides the corresponding configured default; a
//! missing or unparseable body yields a payload built entirely from
//! defaults. Field names follow the platform push contract (camelCase).

use beacon_core::config::delivery::DeliveryConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single action button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Action identifier reported back when the button is pressed.
    pub action: String,
    /// Button label shown to the user.
    pub title: String,
    /// Optional button icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl NotificationAction {
    pub fn new(action: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            title: title.into(),
            icon: None,
        }
    }
}

/// Structured data carried inside a notification payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Backend identifier used for status reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_id: Option<String>,
    /// Notification type, used for default interaction routing.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Target URL to open when the notification is activated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Any additional fields the backend attached.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A fully resolved notification ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NotificationAction>,
    #[serde(default)]
    pub require_interaction: bool,
    #[serde(default)]
    pub silent: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vibrate: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub data: NotificationData,
}

impl NotificationPayload {
    /// Build a payload from configured defaults alone.
    pub fn defaults(config: &DeliveryConfig) -> Self {
        Self {
            title: config.app_name.clone(),
            body: config.default_body.clone(),
            icon: config.default_icon.clone(),
            badge: config.default_badge.clone(),
            image: None,
            actions: Vec::new(),
            require_interaction: false,
            silent: false,
            vibrate: Vec::new(),
            tag: None,
            data: NotificationData::default(),
        }
    }

    /// Build a payload from defaults, then overlay every field the frame
    /// actually carries.
    pub fn from_frame(frame: PushFrame, config: &DeliveryConfig) -> Self {
        let mut payload = Self::defaults(config);
        if let Some(title) = frame.title {
            payload.title = title;
        }
        if let Some(body) = frame.body {
            payload.body = body;
        }
        if let Some(icon) = frame.icon {
            payload.icon = icon;
        }
        if let Some(badge) = frame.badge {
            payload.badge = badge;
        }
        if frame.image.is_some() {
            payload.image = frame.image;
        }
        if let Some(actions) = frame.actions {
            payload.actions = actions;
        }
        if let Some(require_interaction) = frame.require_interaction {
            payload.require_interaction = require_interaction;
        }
        if let Some(silent) = frame.silent {
            payload.silent = silent;
        }
        if let Some(vibrate) = frame.vibrate {
            payload.vibrate = vibrate;
        }
        if let Some(tag) = frame.tag {
            payload.tag = Some(tag);
        }
        if let Some(data) = frame.data {
            payload.data = data;
        }
        payload
    }
}

/// Raw push frame as received from the push channel. Every field is
/// optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushFrame {
    pub title: Option<String>,
    pub body: Option<String>,
    pub icon: Option<String>,
    pub badge: Option<String>,
    pub image: Option<String>,
    pub actions: Option<Vec<NotificationAction>>,
    pub require_interaction: Option<bool>,
    pub silent: Option<bool>,
    pub vibrate: Option<Vec<u32>>,
    pub tag: Option<String>,
    pub data: Option<NotificationData>,
}

impl PushFrame {
    /// Parse a push body. An empty or unparseable body is treated as an
    /// empty frame so that delivery falls back to configured defaults.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::default();
        }
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}
