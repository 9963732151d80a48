//! Backend call contracts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use beacon_core::result::AppResult;
use beacon_entity::completion::ExerciseCompletion;
use beacon_entity::notification::StatusUpdate;

/// Request to schedule a notification server-side at a future instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// The user the notification is for.
    pub user_id: String,
    /// Notification type.
    #[serde(rename = "type")]
    pub kind: String,
    /// When the notification should fire.
    pub schedule_at: DateTime<Utc>,
    /// Structured data forwarded into the eventual push frame.
    pub data: Value,
}

/// Request to send a notification immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    /// The user the notification is for.
    pub user_id: String,
    /// Notification type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// Structured data forwarded into the push frame.
    pub data: Value,
}

/// Fire-and-forget event log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    /// Event type identifier.
    pub event_type: String,
    /// Arbitrary event data.
    pub data: Value,
}

/// Every network call Beacon makes against the clinic backend.
///
/// Implementations must map transport failures to
/// [`beacon_core::error::ErrorKind::Network`] so that callers can decide
/// between queue-and-retry and log-and-swallow.
#[async_trait]
pub trait NotifyApi: Send + Sync {
    /// Report a delivery status transition. Idempotent server-side.
    async fn post_status(&self, update: &StatusUpdate) -> AppResult<()>;

    /// Replay one queued domain mutation.
    async fn sync_exercise(&self, payload: &Value) -> AppResult<()>;

    /// Schedule a future notification.
    async fn schedule_notification(&self, request: &ScheduleRequest) -> AppResult<()>;

    /// Send a notification immediately.
    async fn send_notification(&self, request: &SendRequest) -> AppResult<()>;

    /// Log a notification event. Failures are the caller's to swallow.
    async fn log_event(&self, report: &EventReport) -> AppResult<()>;

    /// Confirm an appointment on the user's behalf.
    async fn confirm_appointment(&self, appointment_id: &str) -> AppResult<()>;

    /// Fetch the most recent completions for a patient, newest first.
    async fn list_completions(
        &self,
        patient_id: &str,
        limit: u32,
    ) -> AppResult<Vec<ExerciseCompletion>>;

    /// Count a patient's completions, optionally restricted to those at
    /// or after `since`.
    async fn count_completions(
        &self,
        patient_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<u64>;

    /// Probe backend reachability.
    async fn health(&self) -> AppResult<bool>;
}
