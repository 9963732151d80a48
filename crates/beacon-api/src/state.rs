//! Application state shared across all handlers.

use std::sync::Arc;

use beacon_client::NotifyApi;
use beacon_core::config::AppConfig;
use beacon_delivery::{ActionRouter, DeliveryPipeline};
use beacon_engine::{MilestoneEngine, ReminderScheduler};
use beacon_store::QueueStore;
use beacon_sync::SyncReconciler;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Durable queue store.
    pub store: QueueStore,
    /// Backend API client, used directly for health probing.
    pub api: Arc<dyn NotifyApi>,
    /// Push delivery pipeline.
    pub pipeline: Arc<DeliveryPipeline>,
    /// Notification interaction router.
    pub actions: Arc<ActionRouter>,
    /// Durable queue reconciler.
    pub reconciler: Arc<SyncReconciler>,
    /// Reminder calendar scheduler.
    pub reminders: Arc<ReminderScheduler>,
    /// Milestone and streak engine.
    pub milestones: Arc<MilestoneEngine>,
}
