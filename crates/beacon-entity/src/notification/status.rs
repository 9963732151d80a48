//! Delivery status reporting entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status reported back to the backend for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// The notification was shown to the user.
    Delivered,
    /// The user activated the notification.
    Clicked,
}

impl DeliveryStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Clicked => "clicked",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A status report for one notification, posted to the backend or queued
/// for later replay when the backend is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// Backend identifier of the notification.
    pub notification_id: String,
    /// The status being reported.
    pub status: DeliveryStatus,
    /// When the status transition happened.
    pub timestamp: DateTime<Utc>,
}

impl StatusUpdate {
    /// Build a status update stamped with the current time.
    pub fn now(notification_id: impl Into<String>, status: DeliveryStatus) -> Self {
        Self {
            notification_id: notification_id.into(),
            status,
            timestamp: Utc::now(),
        }
    }
}
