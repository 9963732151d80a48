//! Cron scheduler for periodic tasks.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing::{error, info};

use beacon_core::config::store::StoreConfig;
use beacon_core::config::sync::SyncConfig;
use beacon_core::error::AppError;
use beacon_core::result::AppResult;
use beacon_store::QueueStore;

use crate::periodic::PeriodicReminder;

/// Cron-based scheduler for Beacon's periodic tasks.
pub struct BeaconScheduler {
    scheduler: JobScheduler,
    sync_config: SyncConfig,
    store_config: StoreConfig,
}

impl std::fmt::Debug for BeaconScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeaconScheduler").finish()
    }
}

impl BeaconScheduler {
    pub async fn new(sync_config: SyncConfig, store_config: StoreConfig) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;
        Ok(Self {
            scheduler,
            sync_config,
            store_config,
        })
    }

    /// Register the periodic reminder and the daily store purge.
    pub async fn register_tasks(
        &self,
        reminder: PeriodicReminder,
        store: QueueStore,
    ) -> AppResult<()> {
        self.register_reminder(reminder).await?;
        self.register_maintenance(store).await?;
        info!("All scheduled tasks registered");
        Ok(())
    }

    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;
        info!("Cron scheduler started");
        Ok(())
    }

    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;
        info!("Cron scheduler shut down");
        Ok(())
    }

    async fn register_reminder(&self, reminder: PeriodicReminder) -> AppResult<()> {
        let reminder = Arc::new(reminder);
        let cron = self.sync_config.reminder_cron.clone();
        let job = CronJob::new_async(cron.as_str(), move |_uuid, _lock| {
            let reminder = Arc::clone(&reminder);
            Box::pin(async move {
                reminder.tick().await;
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create reminder schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add reminder schedule: {e}")))?;

        info!(cron = %cron, "Registered: exercise-reminder");
        Ok(())
    }

    async fn register_maintenance(&self, store: QueueStore) -> AppResult<()> {
        let cron = self.sync_config.maintenance_cron.clone();
        let max_age_days = self.store_config.max_entry_age_days;
        let job = CronJob::new_async(cron.as_str(), move |_uuid, _lock| {
            let store = store.clone();
            Box::pin(async move {
                if let Err(e) = store.purge_older_than(max_age_days).await {
                    error!(error = %e, "Queue store purge failed");
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create maintenance schedule: {e}")))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add maintenance schedule: {e}")))?;

        info!(cron = %cron, max_age_days, "Registered: store-maintenance");
        Ok(())
    }
}
