//! Durable queue reconciliation.

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use beacon_client::NotifyApi;
use beacon_core::config::delivery::DeliveryConfig;
use beacon_core::error::AppError;
use beacon_core::result::AppResult;
use beacon_delivery::Displayer;
use beacon_entity::notification::{NotificationPayload, StatusUpdate};
use beacon_store::{QueueEntry, QueueName, QueueStore};

/// Named unit of retry work. Each tag drains exactly one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncTag {
    /// Replay queued exercise completions against the backend.
    ExerciseSync,
    /// Re-display queued notifications.
    NotificationSync,
    /// Replay queued delivery status reports.
    NotificationStatusSync,
}

impl SyncTag {
    /// All tags, in reconciliation order.
    pub const ALL: [SyncTag; 3] = [
        Self::ExerciseSync,
        Self::NotificationSync,
        Self::NotificationStatusSync,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExerciseSync => "exercise-sync",
            Self::NotificationSync => "notification-sync",
            Self::NotificationStatusSync => "notification-status-sync",
        }
    }

    /// The queue this tag drains.
    pub fn queue(&self) -> QueueName {
        match self {
            Self::ExerciseSync => QueueName::PendingExercises,
            Self::NotificationSync => QueueName::PendingNotifications,
            Self::NotificationStatusSync => QueueName::StatusUpdates,
        }
    }
}

impl FromStr for SyncTag {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exercise-sync" => Ok(Self::ExerciseSync),
            "notification-sync" => Ok(Self::NotificationSync),
            "notification-status-sync" => Ok(Self::NotificationStatusSync),
            other => Err(AppError::validation(format!("Unknown sync tag: {other}"))),
        }
    }
}

impl std::fmt::Display for SyncTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one reconciliation pass over one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    /// Entries successfully replayed and removed.
    pub replayed: usize,
    /// Entries that failed and remain queued.
    pub failed: usize,
    /// Entries dropped because their payload was unreadable.
    pub dropped: usize,
}

impl SyncReport {
    /// Whether the queue fully drained and at least one entry moved.
    pub fn drained(&self) -> bool {
        self.failed == 0 && self.replayed > 0
    }
}

/// Replays durable queues against their target endpoints. Failed entries
/// are left unmodified and retried in full on the next trigger; there is
/// no backoff counter.
#[derive(Clone)]
pub struct SyncReconciler {
    store: QueueStore,
    api: Arc<dyn NotifyApi>,
    displayer: Arc<dyn Displayer>,
    config: DeliveryConfig,
}

impl SyncReconciler {
    pub fn new(
        store: QueueStore,
        api: Arc<dyn NotifyApi>,
        displayer: Arc<dyn Displayer>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            store,
            api,
            displayer,
            config,
        }
    }

    /// Run one reconciliation pass for a tag.
    pub async fn run(&self, tag: SyncTag) -> AppResult<SyncReport> {
        let queue = tag.queue();
        let entries = self.store.list_all(queue).await?;
        if entries.is_empty() {
            return Ok(SyncReport::default());
        }

        info!(tag = %tag, pending = entries.len(), "Reconciling queue");
        let mut report = SyncReport::default();

        for entry in entries {
            match self.replay(tag, &entry).await {
                Ok(ReplayOutcome::Done) => {
                    self.store.remove(queue, entry.id).await?;
                    report.replayed += 1;
                }
                Ok(ReplayOutcome::Unreadable) => {
                    // A payload that cannot be decoded will never succeed.
                    warn!(tag = %tag, id = entry.id, "Dropping unreadable queue entry");
                    self.store.remove(queue, entry.id).await?;
                    report.dropped += 1;
                }
                Err(e) => {
                    warn!(tag = %tag, id = entry.id, error = %e, "Replay failed, entry stays queued");
                    report.failed += 1;
                }
            }
        }

        if tag == SyncTag::ExerciseSync && report.drained() {
            self.show_sync_confirmation(report.replayed).await;
        }

        info!(
            tag = %tag,
            replayed = report.replayed,
            failed = report.failed,
            dropped = report.dropped,
            "Reconciliation pass done"
        );
        Ok(report)
    }

    /// Run every tag once, in order.
    pub async fn run_all(&self) -> AppResult<Vec<(SyncTag, SyncReport)>> {
        let mut reports = Vec::with_capacity(SyncTag::ALL.len());
        for tag in SyncTag::ALL {
            let report = self.run(tag).await?;
            reports.push((tag, report));
        }
        Ok(reports)
    }

    async fn replay(&self, tag: SyncTag, entry: &QueueEntry) -> AppResult<ReplayOutcome> {
        match tag {
            SyncTag::ExerciseSync => {
                self.api.sync_exercise(&entry.payload).await?;
                Ok(ReplayOutcome::Done)
            }
            SyncTag::NotificationSync => {
                let Ok(payload) =
                    serde_json::from_value::<NotificationPayload>(entry.payload.clone())
                else {
                    return Ok(ReplayOutcome::Unreadable);
                };
                self.displayer.display(&payload).await?;
                Ok(ReplayOutcome::Done)
            }
            SyncTag::NotificationStatusSync => {
                let Ok(update) = serde_json::from_value::<StatusUpdate>(entry.payload.clone())
                else {
                    return Ok(ReplayOutcome::Unreadable);
                };
                self.api.post_status(&update).await?;
                Ok(ReplayOutcome::Done)
            }
        }
    }

    async fn show_sync_confirmation(&self, synced: usize) {
        let mut payload = NotificationPayload::defaults(&self.config);
        payload.body = if synced == 1 {
            "1 exercise synced successfully".to_string()
        } else {
            format!("{synced} exercises synced successfully")
        };
        payload.tag = Some("exercise-sync-complete".to_string());
        if let Err(e) = self.displayer.display(&payload).await {
            warn!(error = %e, "Sync confirmation display failed");
        }
    }
}

enum ReplayOutcome {
    Done,
    Unreadable,
}
