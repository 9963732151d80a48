//! Backend connectivity monitoring.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{debug, info, warn};

use beacon_client::NotifyApi;
use beacon_core::config::sync::SyncConfig;

use crate::reconciler::SyncReconciler;

/// Probes the backend on an interval and fires a full reconciliation
/// pass on every offline-to-online transition. The monitor starts in the
/// offline state so the first successful probe drains whatever queued up
/// while the process was down.
pub struct ConnectivityMonitor {
    api: Arc<dyn NotifyApi>,
    reconciler: Arc<SyncReconciler>,
    probe_interval: Duration,
}

impl ConnectivityMonitor {
    pub fn new(api: Arc<dyn NotifyApi>, reconciler: Arc<SyncReconciler>, config: &SyncConfig) -> Self {
        Self {
            api,
            reconciler,
            probe_interval: Duration::from_secs(config.probe_interval_seconds),
        }
    }

    /// Run until shutdown is signalled.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.probe_interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);
        let mut online = false;

        info!(interval_seconds = self.probe_interval.as_secs(), "Connectivity monitor started");
        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("Connectivity monitor stopping");
                        break;
                    }
                }
                _ = interval.tick() => {
                    let reachable = self.api.health().await.unwrap_or(false);
                    if reachable && !online {
                        info!("Connectivity restored, reconciling queues");
                        if let Err(e) = self.reconciler.run_all().await {
                            warn!(error = %e, "Reconciliation after reconnect failed");
                        }
                    } else if !reachable && online {
                        info!("Connectivity lost");
                    } else {
                        debug!(reachable, "Connectivity probe");
                    }
                    online = reachable;
                }
            }
        }
    }
}
