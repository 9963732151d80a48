//! Push delivery pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use beacon_client::NotifyApi;
use beacon_core::config::delivery::DeliveryConfig;
use beacon_core::result::AppResult;
use beacon_entity::notification::{
    DeliveryStatus, NotificationPayload, PushFrame, StatusUpdate,
};
use beacon_store::{QueueName, QueueStore};

use crate::display::Displayer;

/// Posts a status update to the backend, falling back to the durable
/// queue when the network is unavailable. Shared by the delivery
/// pipeline and the action router.
#[derive(Clone)]
pub struct StatusReporter {
    api: Arc<dyn NotifyApi>,
    store: QueueStore,
}

impl StatusReporter {
    pub fn new(api: Arc<dyn NotifyApi>, store: QueueStore) -> Self {
        Self { api, store }
    }

    /// Report a status transition, network-first with queue fallback.
    /// Only a store failure propagates; a network failure is absorbed by
    /// the queue.
    pub async fn report(&self, update: StatusUpdate) -> AppResult<()> {
        match self.api.post_status(&update).await {
            Ok(()) => {
                debug!(
                    notification_id = %update.notification_id,
                    status = %update.status,
                    "Reported status"
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    notification_id = %update.notification_id,
                    status = %update.status,
                    error = %e,
                    "Status report failed, queueing for replay"
                );
                let payload = serde_json::to_value(&update)?;
                self.store.enqueue(QueueName::StatusUpdates, &payload).await?;
                Ok(())
            }
        }
    }
}

/// Turns raw push frames into displayed notifications.
///
/// Display and delivery acknowledgement run concurrently and fail
/// independently; neither can prevent the other.
#[derive(Clone)]
pub struct DeliveryPipeline {
    displayer: Arc<dyn Displayer>,
    reporter: StatusReporter,
    store: QueueStore,
    config: DeliveryConfig,
}

impl DeliveryPipeline {
    pub fn new(
        displayer: Arc<dyn Displayer>,
        reporter: StatusReporter,
        store: QueueStore,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            displayer,
            reporter,
            store,
            config,
        }
    }

    /// Handle one incoming push frame. Returns the payload that was
    /// resolved for display.
    pub async fn handle_push(&self, body: &[u8]) -> AppResult<NotificationPayload> {
        let frame = PushFrame::from_bytes(body);
        let payload = NotificationPayload::from_frame(frame, &self.config);

        let (display_result, ack_result) =
            tokio::join!(self.display_or_queue(&payload), self.ack_delivered(&payload));
        display_result?;
        ack_result?;

        Ok(payload)
    }

    /// Display the payload; a display failure queues it for replay.
    async fn display_or_queue(&self, payload: &NotificationPayload) -> AppResult<()> {
        match self.displayer.display(payload).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(title = %payload.title, error = %e, "Display failed, queueing notification");
                let value = serde_json::to_value(payload)?;
                self.store
                    .enqueue(QueueName::PendingNotifications, &value)
                    .await?;
                Ok(())
            }
        }
    }

    /// Log a `delivered` status when the frame carries a notification id.
    async fn ack_delivered(&self, payload: &NotificationPayload) -> AppResult<()> {
        let Some(notification_id) = payload.data.notification_id.clone() else {
            return Ok(());
        };
        self.reporter
            .report(StatusUpdate::now(notification_id, DeliveryStatus::Delivered))
            .await
    }
}
