//! # beacon-sync
//!
//! Everything that runs when nobody is looking: replaying durable queues
//! against the backend once connectivity returns, probing for that
//! connectivity, and the cron-driven periodic tasks (exercise reminders,
//! queue store maintenance).

pub mod connectivity;
pub mod periodic;
pub mod reconciler;
pub mod scheduler;

pub use connectivity::ConnectivityMonitor;
pub use periodic::PeriodicReminder;
pub use reconciler::{SyncReconciler, SyncReport, SyncTag};
pub use scheduler::BeaconScheduler;
