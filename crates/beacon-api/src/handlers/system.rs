//! Health and queue introspection handlers.

use axum::extract::State;
use axum::Json;

use beacon_store::QueueName;

use crate::dto::{ApiResponse, HealthResponse, QueueDepths};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /health
pub async fn health(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    let store = state.store.health_check().await.unwrap_or(false);
    let backend = state.api.health().await.unwrap_or(false);
    let status = if store { "ok" } else { "degraded" };
    Ok(Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        store,
        backend,
    })))
}

/// GET /queues
pub async fn queue_depths(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<QueueDepths>>, ApiError> {
    Ok(Json(ApiResponse::ok(QueueDepths {
        pending_exercises: state.store.len(QueueName::PendingExercises).await?,
        pending_notifications: state.store.len(QueueName::PendingNotifications).await?,
        status_updates: state.store.len(QueueName::StatusUpdates).await?,
    })))
}
