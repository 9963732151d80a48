//! Notification display surface.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use beacon_core::result::AppResult;
use beacon_entity::notification::NotificationPayload;

/// Something that can show a notification to the user.
///
/// A display failure is never fatal: the caller queues the payload for
/// replay instead.
#[async_trait]
pub trait Displayer: Send + Sync {
    /// Show one notification.
    async fn display(&self, payload: &NotificationPayload) -> AppResult<()>;
}

/// Broadcast-channel displayer. Connected display surfaces subscribe and
/// render whatever arrives; with no subscribers the payload is dropped
/// silently, which mirrors a notification shown on a switched-off screen.
#[derive(Debug, Clone)]
pub struct ChannelDisplayer {
    tx: broadcast::Sender<NotificationPayload>,
}

impl ChannelDisplayer {
    /// Create a displayer with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe a new display surface.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationPayload> {
        self.tx.subscribe()
    }
}

impl Default for ChannelDisplayer {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl Displayer for ChannelDisplayer {
    async fn display(&self, payload: &NotificationPayload) -> AppResult<()> {
        // A send error only means no surface is subscribed right now.
        match self.tx.send(payload.clone()) {
            Ok(receivers) => debug!(receivers, title = %payload.title, "Displayed notification"),
            Err(_) => debug!(title = %payload.title, "No display surface subscribed"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_core::config::delivery::DeliveryConfig;

    #[tokio::test]
    async fn test_subscriber_receives_payload() {
        let displayer = ChannelDisplayer::new(4);
        let mut rx = displayer.subscribe();

        let payload = NotificationPayload::defaults(&DeliveryConfig::default());
        displayer.display(&payload).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.title, payload.title);
    }

    #[tokio::test]
    async fn test_display_without_subscribers_is_ok() {
        let displayer = ChannelDisplayer::new(4);
        let payload = NotificationPayload::defaults(&DeliveryConfig::default());
        assert!(displayer.display(&payload).await.is_ok());
    }
}
