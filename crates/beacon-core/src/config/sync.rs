//! Sync reconciler and periodic reminder configuration.

use serde::{Deserialize, Serialize};

/// Connectivity monitoring and periodic task settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Seconds between backend connectivity probes.
    #[serde(default = "default_probe_interval")]
    pub probe_interval_seconds: u64,
    /// Cron expression for the periodic exercise reminder.
    #[serde(default = "default_reminder_cron")]
    pub reminder_cron: String,
    /// Earliest local hour (inclusive) at which the periodic reminder may fire.
    #[serde(default = "default_reminder_window_start")]
    pub reminder_window_start_hour: u32,
    /// Latest local hour (exclusive) at which the periodic reminder may fire.
    #[serde(default = "default_reminder_window_end")]
    pub reminder_window_end_hour: u32,
    /// Cron expression for the daily queue-store maintenance purge.
    #[serde(default = "default_maintenance_cron")]
    pub maintenance_cron: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            probe_interval_seconds: default_probe_interval(),
            reminder_cron: default_reminder_cron(),
            reminder_window_start_hour: default_reminder_window_start(),
            reminder_window_end_hour: default_reminder_window_end(),
            maintenance_cron: default_maintenance_cron(),
        }
    }
}

fn default_probe_interval() -> u64 {
    30
}

fn default_reminder_cron() -> String {
    // Hourly; the handler gates on the 09:00-18:00 window itself.
    "0 0 * * * *".to_string()
}

fn default_reminder_window_start() -> u32 {
    9
}

fn default_reminder_window_end() -> u32 {
    18
}

fn default_maintenance_cron() -> String {
    // Daily at 2 AM.
    "0 0 2 * * *".to_string()
}
