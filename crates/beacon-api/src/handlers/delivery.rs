//! Push delivery and interaction handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use beacon_delivery::{Interaction, RouteDecision};
use beacon_entity::notification::NotificationPayload;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Outcome of routing one interaction.
#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub dismissed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<RouteDecision> for InteractionResponse {
    fn from(decision: RouteDecision) -> Self {
        match decision {
            RouteDecision::Dismiss => Self { dismissed: true, url: None },
            RouteDecision::Navigate { url } => Self { dismissed: false, url: Some(url) },
        }
    }
}

/// POST /push — ingest one raw push frame.
pub async fn handle_push(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<NotificationPayload>>, ApiError> {
    let payload = state.pipeline.handle_push(&body).await?;
    Ok(Json(ApiResponse::ok(payload)))
}

/// POST /interactions — route one notification interaction.
pub async fn handle_interaction(
    State(state): State<AppState>,
    Json(interaction): Json<Interaction>,
) -> Result<Json<ApiResponse<InteractionResponse>>, ApiError> {
    let decision = state.actions.handle_interaction(interaction).await?;
    Ok(Json(ApiResponse::ok(decision.into())))
}
