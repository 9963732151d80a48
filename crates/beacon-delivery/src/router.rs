//! Notification interaction routing.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use beacon_client::{EventReport, NotifyApi};
use beacon_core::result::AppResult;
use beacon_entity::notification::{DeliveryStatus, NotificationData, StatusUpdate};

use crate::pipeline::StatusReporter;
use crate::sessions::{ForegroundMessage, SessionHub};

/// One user interaction with a displayed notification. `action` is absent
/// when the notification body itself was clicked.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub data: NotificationData,
}

/// Outcome of target resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Close the notification, navigate nowhere.
    Dismiss,
    /// Navigate the foreground to this URL.
    Navigate { url: String },
}

fn extra_str<'a>(data: &'a NotificationData, key: &str) -> Option<&'a str> {
    data.extra.get(key).and_then(Value::as_str)
}

fn default_for_kind(kind: Option<&str>) -> &'static str {
    match kind {
        Some("appointment_reminder" | "appointment_change") => "/schedule",
        Some("exercise_reminder" | "exercise_milestone") => "/exercises",
        Some("progress_update") => "/patients",
        Some("therapist_message") => "/communications",
        Some("payment_reminder") => "/financial",
        _ => "/",
    }
}

/// Resolve where an interaction should take the user.
///
/// Specific actions map to deep links carrying the relevant entity id;
/// `later`, `remind-later` and `dismiss` short-circuit; a bare body
/// click uses the payload URL when present and otherwise falls back to
/// a per-type default view.
pub fn resolve_target(action: Option<&str>, data: &NotificationData) -> RouteDecision {
    let url = match action {
        Some("later" | "remind-later" | "dismiss") => return RouteDecision::Dismiss,
        Some("confirm") => match extra_str(data, "appointmentId") {
            Some(id) => format!("/appointments/{id}?confirmed=true"),
            None => "/schedule".to_string(),
        },
        Some("reschedule") => match extra_str(data, "appointmentId") {
            Some(id) => format!("/appointments/{id}/reschedule"),
            None => "/schedule".to_string(),
        },
        Some("start" | "start-exercise") => match extra_str(data, "exerciseId") {
            Some(id) => format!("/exercises/{id}/start"),
            None => "/exercises".to_string(),
        },
        Some("reply") => match extra_str(data, "conversationId") {
            Some(id) => format!("/communications/{id}"),
            None => "/communications".to_string(),
        },
        Some("pay") => match extra_str(data, "invoiceId") {
            Some(id) => format!("/financial/invoices/{id}"),
            None => "/financial".to_string(),
        },
        // `view` and a bare body click both use the payload URL, then
        // the per-type default view.
        _ => data
            .url
            .clone()
            .unwrap_or_else(|| default_for_kind(data.kind.as_deref()).to_string()),
    };
    RouteDecision::Navigate { url }
}

/// Routes notification interactions into the foreground application.
#[derive(Clone)]
pub struct ActionRouter {
    api: Arc<dyn NotifyApi>,
    sessions: Arc<dyn SessionHub>,
    reporter: StatusReporter,
}

impl ActionRouter {
    pub fn new(
        api: Arc<dyn NotifyApi>,
        sessions: Arc<dyn SessionHub>,
        reporter: StatusReporter,
    ) -> Self {
        Self {
            api,
            sessions,
            reporter,
        }
    }

    /// Handle one interaction end to end: side effects, navigation and
    /// the `clicked` status report.
    pub async fn handle_interaction(&self, interaction: Interaction) -> AppResult<RouteDecision> {
        let action = interaction.action.as_deref();

        // Confirm writes through to the backend before navigating. A
        // failure here only costs the write; navigation still happens.
        if action == Some("confirm") {
            if let Some(appointment_id) = extra_str(&interaction.data, "appointmentId") {
                if let Err(e) = self.api.confirm_appointment(appointment_id).await {
                    warn!(appointment_id, error = %e, "Appointment confirmation failed");
                }
            }
        }

        let decision = resolve_target(action, &interaction.data);

        match &decision {
            RouteDecision::Dismiss => {
                debug!(?action, "Interaction dismissed");
                // Fire-and-forget; a dismissal is an event, not a status.
                let report = EventReport {
                    event_type: "notification_dismissed".to_string(),
                    data: serde_json::to_value(&interaction.data)?,
                };
                if let Err(e) = self.api.log_event(&report).await {
                    debug!(error = %e, "Dismissal event log failed");
                }
            }
            RouteDecision::Navigate { url } => {
                let message = ForegroundMessage::NotificationClicked {
                    action: interaction.action.clone(),
                    data: serde_json::to_value(&interaction.data)?,
                    url: url.clone(),
                };
                if !self.sessions.focus_first(message).await? {
                    self.sessions.open(url).await?;
                }

                if let Some(notification_id) = interaction.data.notification_id.clone() {
                    self.reporter
                        .report(StatusUpdate::now(notification_id, DeliveryStatus::Clicked))
                        .await?;
                }
            }
        }

        Ok(decision)
    }
}
