//! Reminder scheduling and completion processing handlers.

use axum::extract::State;
use axum::Json;

use beacon_engine::ScheduleReport;
use beacon_entity::completion::ExerciseCompletion;
use beacon_entity::milestone::Milestone;
use beacon_entity::prescription::ExercisePrescription;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /prescriptions/schedule — compute and schedule the full reminder
/// calendar for one prescription.
pub async fn schedule_prescription(
    State(state): State<AppState>,
    Json(prescription): Json<ExercisePrescription>,
) -> Result<Json<ApiResponse<ScheduleReport>>, ApiError> {
    let report = state.reminders.schedule(&prescription).await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// POST /completions — run milestone analysis for one completion event.
pub async fn process_completion(
    State(state): State<AppState>,
    Json(completion): Json<ExerciseCompletion>,
) -> Result<Json<ApiResponse<Vec<Milestone>>>, ApiError> {
    let milestones = state.milestones.process(&completion).await;
    Ok(Json(ApiResponse::ok(milestones)))
}
