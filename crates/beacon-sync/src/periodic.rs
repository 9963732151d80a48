//! Periodic exercise reminder.

use std::sync::Arc;

use chrono::{Local, Timelike};
use tracing::{debug, warn};

use beacon_core::config::delivery::DeliveryConfig;
use beacon_core::config::sync::SyncConfig;
use beacon_delivery::Displayer;
use beacon_entity::notification::{NotificationAction, NotificationData, NotificationPayload};

/// Shows a generic "time to exercise" reminder, gated to daytime hours
/// so nobody gets buzzed at 3 AM. Fired by the cron scheduler.
#[derive(Clone)]
pub struct PeriodicReminder {
    displayer: Arc<dyn Displayer>,
    delivery: DeliveryConfig,
    window_start_hour: u32,
    window_end_hour: u32,
}

impl PeriodicReminder {
    pub fn new(displayer: Arc<dyn Displayer>, delivery: DeliveryConfig, sync: &SyncConfig) -> Self {
        Self {
            displayer,
            delivery,
            window_start_hour: sync.reminder_window_start_hour,
            window_end_hour: sync.reminder_window_end_hour,
        }
    }

    /// Build the reminder payload for the given local hour, or `None`
    /// when the hour falls outside the allowed window.
    pub fn payload_for_hour(&self, hour: u32) -> Option<NotificationPayload> {
        if hour < self.window_start_hour || hour >= self.window_end_hour {
            return None;
        }
        let mut payload = NotificationPayload::defaults(&self.delivery);
        payload.body = "Time for your exercises! Keep up the great work.".to_string();
        payload.tag = Some("exercise-reminder".to_string());
        payload.actions = vec![
            NotificationAction::new("start-exercise", "Start now"),
            NotificationAction::new("remind-later", "Remind me later"),
        ];
        payload.data = NotificationData {
            kind: Some("exercise_reminder".to_string()),
            url: Some("/exercises".to_string()),
            ..NotificationData::default()
        };
        Some(payload)
    }

    /// Show the reminder if the current local time allows it.
    pub async fn tick(&self) {
        let hour = Local::now().hour();
        match self.payload_for_hour(hour) {
            Some(payload) => {
                if let Err(e) = self.displayer.display(&payload).await {
                    warn!(error = %e, "Periodic reminder display failed");
                }
            }
            None => debug!(hour, "Outside reminder window, skipping"),
        }
    }
}
