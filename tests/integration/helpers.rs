//! Shared test helpers for integration tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;

use beacon_api::{build_router, AppState};
use beacon_client::{EventReport, NotifyApi, ScheduleRequest, SendRequest};
use beacon_core::config::{AppConfig, StoreConfig};
use beacon_core::error::AppError;
use beacon_core::result::AppResult;
use beacon_delivery::pipeline::StatusReporter;
use beacon_delivery::{ActionRouter, ChannelDisplayer, DeliveryPipeline, SessionRegistry};
use beacon_engine::{BackendCompletionSource, MilestoneEngine, ReminderScheduler};
use beacon_entity::completion::ExerciseCompletion;
use beacon_entity::notification::StatusUpdate;
use beacon_store::QueueStore;
use beacon_sync::SyncReconciler;

/// In-memory stand-in for the clinic backend. Records every call and can
/// be flipped offline to exercise the queue fallback paths.
#[derive(Default)]
pub struct MockBackend {
    offline: AtomicBool,
    pub statuses: Mutex<Vec<StatusUpdate>>,
    pub synced: Mutex<Vec<Value>>,
    pub scheduled: Mutex<Vec<ScheduleRequest>>,
    pub sent: Mutex<Vec<SendRequest>>,
    pub confirmed: Mutex<Vec<String>>,
    pub completions: Mutex<Vec<ExerciseCompletion>>,
    pub total_count: AtomicU64,
    pub weekly_count: AtomicU64,
}

impl MockBackend {
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AppError::network("Backend unreachable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NotifyApi for MockBackend {
    async fn post_status(&self, update: &StatusUpdate) -> AppResult<()> {
        self.check()?;
        self.statuses.lock().unwrap().push(update.clone());
        Ok(())
    }

    async fn sync_exercise(&self, payload: &Value) -> AppResult<()> {
        self.check()?;
        self.synced.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn schedule_notification(&self, request: &ScheduleRequest) -> AppResult<()> {
        self.check()?;
        self.scheduled.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn send_notification(&self, request: &SendRequest) -> AppResult<()> {
        self.check()?;
        self.sent.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn log_event(&self, _report: &EventReport) -> AppResult<()> {
        self.check()
    }

    async fn confirm_appointment(&self, appointment_id: &str) -> AppResult<()> {
        self.check()?;
        self.confirmed.lock().unwrap().push(appointment_id.to_string());
        Ok(())
    }

    async fn list_completions(
        &self,
        _patient_id: &str,
        limit: u32,
    ) -> AppResult<Vec<ExerciseCompletion>> {
        self.check()?;
        let completions = self.completions.lock().unwrap();
        Ok(completions.iter().take(limit as usize).cloned().collect())
    }

    async fn count_completions(
        &self,
        _patient_id: &str,
        since: Option<DateTime<Utc>>,
    ) -> AppResult<u64> {
        self.check()?;
        Ok(match since {
            None => self.total_count.load(Ordering::SeqCst),
            Some(_) => self.weekly_count.load(Ordering::SeqCst),
        })
    }

    async fn health(&self) -> AppResult<bool> {
        Ok(!self.offline.load(Ordering::SeqCst))
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Durable queue store, for direct inspection
    pub store: QueueStore,
    /// The recording fake backend
    pub backend: Arc<MockBackend>,
    /// Display surface notifications are rendered into
    pub displayer: Arc<ChannelDisplayer>,
    /// Session registry, for simulating foreground windows
    pub sessions: Arc<SessionRegistry>,
}

impl TestApp {
    /// Create a new test application on an in-memory store.
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.store = StoreConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            max_entry_age_days: 30,
        };

        let store = QueueStore::open(&config.store)
            .await
            .expect("Failed to open test store");

        let backend = Arc::new(MockBackend::default());
        let displayer = Arc::new(ChannelDisplayer::default());
        let sessions = Arc::new(SessionRegistry::new());

        let api: Arc<dyn NotifyApi> = backend.clone();
        let reporter = StatusReporter::new(api.clone(), store.clone());
        let pipeline = Arc::new(DeliveryPipeline::new(
            displayer.clone(),
            reporter.clone(),
            store.clone(),
            config.delivery.clone(),
        ));
        let actions = Arc::new(ActionRouter::new(api.clone(), sessions.clone(), reporter));
        let reconciler = Arc::new(SyncReconciler::new(
            store.clone(),
            api.clone(),
            displayer.clone(),
            config.delivery.clone(),
        ));
        let reminders = Arc::new(ReminderScheduler::new(api.clone()));
        let milestones = Arc::new(MilestoneEngine::new(
            Arc::new(BackendCompletionSource::new(api.clone())),
            api.clone(),
        ));

        let state = AppState {
            config: Arc::new(config),
            store: store.clone(),
            api,
            pipeline,
            actions,
            reconciler,
            reminders,
            milestones,
        };

        Self {
            router: build_router(state),
            store,
            backend,
            displayer,
            sessions,
        }
    }

    /// Make a JSON request to the test app.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Make a request with a raw, possibly non-JSON body.
    pub async fn request_raw(&self, method: &str, path: &str, body: &[u8]) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::from(body.to_vec()))
            .expect("Failed to build request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Response from a test request
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}
