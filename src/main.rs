//! Beacon Server — offline-resilient notification delivery and reminders
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use beacon_client::HttpNotifyApi;
use beacon_core::config::AppConfig;
use beacon_core::error::AppError;
use beacon_delivery::pipeline::StatusReporter;
use beacon_delivery::{
    ActionRouter, ChannelDisplayer, DeliveryPipeline, LifecycleController, SessionHub,
    SessionRegistry,
};
use beacon_engine::{BackendCompletionSource, MilestoneEngine, ReminderScheduler};
use beacon_store::QueueStore;
use beacon_sync::{BeaconScheduler, ConnectivityMonitor, PeriodicReminder, SyncReconciler};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("BEACON_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Beacon v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Create data directories ──────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Open the durable queue store ─────────────────────
    // A store-open failure is fatal: without persistence the
    // reliability guarantee collapses.
    let store = QueueStore::open(&config.store).await?;

    // ── Step 3: Sessions, display surface, lifecycle ─────────────
    let sessions: Arc<dyn SessionHub> = Arc::new(SessionRegistry::new());
    let displayer = Arc::new(ChannelDisplayer::default());

    let mut lifecycle =
        LifecycleController::new(config.lifecycle.clone(), Arc::clone(&sessions));
    lifecycle.install().await;
    lifecycle.activate().await;

    // ── Step 4: Backend client and delivery services ─────────────
    let api = Arc::new(HttpNotifyApi::new(&config.backend)?);

    let reporter = StatusReporter::new(api.clone(), store.clone());
    let pipeline = Arc::new(DeliveryPipeline::new(
        displayer.clone(),
        reporter.clone(),
        store.clone(),
        config.delivery.clone(),
    ));
    let actions = Arc::new(ActionRouter::new(
        api.clone(),
        sessions.clone(),
        reporter,
    ));
    let reconciler = Arc::new(SyncReconciler::new(
        store.clone(),
        api.clone(),
        displayer.clone(),
        config.delivery.clone(),
    ));

    // ── Step 5: Engine services ──────────────────────────────────
    let completion_source = Arc::new(BackendCompletionSource::new(api.clone()));
    let reminders = Arc::new(ReminderScheduler::new(api.clone()));
    let milestones = Arc::new(MilestoneEngine::new(completion_source, api.clone()));

    // ── Step 6: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 7: Cron scheduler ───────────────────────────────────
    let mut scheduler = BeaconScheduler::new(config.sync.clone(), config.store.clone()).await?;
    let periodic = PeriodicReminder::new(
        displayer.clone(),
        config.delivery.clone(),
        &config.sync,
    );
    scheduler.register_tasks(periodic, store.clone()).await?;
    scheduler.start().await?;

    // ── Step 8: Connectivity monitor ─────────────────────────────
    let monitor = ConnectivityMonitor::new(api.clone(), Arc::clone(&reconciler), &config.sync);
    let monitor_cancel = shutdown_rx.clone();
    let monitor_handle = tokio::spawn(async move {
        monitor.run(monitor_cancel).await;
    });

    // ── Step 9: Build and start HTTP server ──────────────────────
    let app_state = beacon_api::AppState {
        config: Arc::new(config.clone()),
        store: store.clone(),
        api: api.clone(),
        pipeline,
        actions,
        reconciler,
        reminders,
        milestones,
    };

    let app = beacon_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Beacon server listening on {}", addr);

    // ── Step 10: Graceful shutdown ───────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 11: Wait for background tasks ───────────────────────
    scheduler.shutdown().await?;
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), monitor_handle).await;
    store.close().await;

    tracing::info!("Beacon server shut down gracefully");
    Ok(())
}

/// Create required data directories
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let mut dirs = vec![config.lifecycle.cache_root.clone()];
    // The store URL points at a file path unless it is in-memory.
    if let Some(path) = config.store.url.strip_prefix("sqlite://") {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                dirs.push(parent.to_string_lossy().into_owned());
            }
        }
    }

    for dir in &dirs {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create dir '{dir}': {e}")))?;
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
