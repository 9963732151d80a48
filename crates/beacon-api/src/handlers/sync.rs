//! Sync trigger handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use beacon_sync::{SyncReport, SyncTag};

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub tag: String,
    pub replayed: usize,
    pub failed: usize,
    pub dropped: usize,
}

impl SyncResponse {
    fn new(tag: SyncTag, report: SyncReport) -> Self {
        Self {
            tag: tag.as_str().to_string(),
            replayed: report.replayed,
            failed: report.failed,
            dropped: report.dropped,
        }
    }
}

/// POST /sync/{tag} — run one reconciliation pass for a named tag.
pub async fn trigger_sync(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<ApiResponse<SyncResponse>>, ApiError> {
    let tag: SyncTag = tag.parse().map_err(ApiError::from)?;
    let report = state.reconciler.run(tag).await?;
    Ok(Json(ApiResponse::ok(SyncResponse::new(tag, report))))
}

/// POST /sync — run every tag once, in order.
pub async fn trigger_sync_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SyncResponse>>>, ApiError> {
    let reports = state.reconciler.run_all().await?;
    let responses = reports
        .into_iter()
        .map(|(tag, report)| SyncResponse::new(tag, report))
        .collect();
    Ok(Json(ApiResponse::ok(responses)))
}
