//! Queue names and entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::fmt;

/// The three durable queues the store maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueName {
    /// Offline domain writes awaiting replay (exercise completions).
    PendingExercises,
    /// Notifications that could not be displayed.
    PendingNotifications,
    /// Delivery status reports that could not reach the backend.
    StatusUpdates,
}

impl QueueName {
    /// All queues, in reconciliation order.
    pub const ALL: [QueueName; 3] = [
        Self::PendingExercises,
        Self::PendingNotifications,
        Self::StatusUpdates,
    ];

    /// The backing table name. Fixed at compile time, never derived from
    /// user input, so it is safe to splice into SQL.
    pub fn table(&self) -> &'static str {
        match self {
            Self::PendingExercises => "pending_exercises",
            Self::PendingNotifications => "pending_notifications",
            Self::StatusUpdates => "status_updates",
        }
    }
}

impl fmt::Display for QueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

/// One durable queue entry. The payload is opaque JSON; its shape is
/// owned by whoever enqueued it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QueueEntry {
    /// Monotonic entry identifier, assigned by the store.
    pub id: i64,
    /// The queued JSON payload.
    pub payload: Value,
    /// When the entry was enqueued.
    pub enqueued_at: DateTime<Utc>,
}
