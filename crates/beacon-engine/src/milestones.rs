//! Milestone and streak detection.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde_json::json;
use tracing::warn;

use beacon_client::{NotifyApi, SendRequest};
use beacon_entity::completion::ExerciseCompletion;
use beacon_entity::milestone::{Milestone, MilestoneKind};

use crate::source::CompletionSource;

/// Lifetime totals that earn a celebration.
pub const TOTAL_CHECKPOINTS: [u64; 6] = [10, 25, 50, 100, 200, 500];

/// Streak lengths that earn a celebration.
pub const STREAK_CHECKPOINTS: [u32; 6] = [3, 7, 14, 30, 60, 100];

/// Completions per calendar week that count as the weekly goal.
const WEEKLY_GOAL: u64 = 7;

/// How many recent completions the streak walk looks at.
const STREAK_LOOKBACK: u32 = 30;

/// Monday of the calendar week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Count consecutive calendar days with at least one completion, walking
/// backward from `today` and stopping at the first gap.
pub fn streak_length(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = days.iter().copied().collect();
    let mut streak = 0;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Analyses each completion event for threshold crossings and emits
/// celebratory notifications through the send API. Every backend failure
/// here is logged and swallowed: a missed celebration is not worth an
/// error path.
#[derive(Clone)]
pub struct MilestoneEngine {
    source: Arc<dyn CompletionSource>,
    api: Arc<dyn NotifyApi>,
}

impl MilestoneEngine {
    pub fn new(source: Arc<dyn CompletionSource>, api: Arc<dyn NotifyApi>) -> Self {
        Self { source, api }
    }

    /// Process one completion. Returns the milestones detected.
    pub async fn process(&self, completion: &ExerciseCompletion) -> Vec<Milestone> {
        let patient_id = completion.patient_id.as_str();
        let today = completion.completed_at.date_naive();
        let mut milestones = Vec::new();

        match self.source.total_completions(patient_id).await {
            Ok(total) if TOTAL_CHECKPOINTS.contains(&total) => {
                milestones.push(Milestone::new(
                    MilestoneKind::TotalCount,
                    total as u32,
                    format!("{total} exercises completed!"),
                ));
            }
            Ok(_) => {}
            Err(e) => warn!(patient_id, error = %e, "Total completion lookup failed"),
        }

        let since = week_start(today)
            .and_time(NaiveTime::MIN)
            .and_utc();
        match self.source.completions_since(patient_id, since).await {
            Ok(WEEKLY_GOAL) => {
                milestones.push(Milestone::new(
                    MilestoneKind::WeeklyGoal,
                    WEEKLY_GOAL as u32,
                    "Weekly goal reached: 7 exercises this week!",
                ));
            }
            Ok(_) => {}
            Err(e) => warn!(patient_id, error = %e, "Weekly completion lookup failed"),
        }

        match self
            .source
            .recent_completion_days(patient_id, STREAK_LOOKBACK)
            .await
        {
            Ok(days) => {
                let streak = streak_length(&days, today);
                if STREAK_CHECKPOINTS.contains(&streak) {
                    milestones.push(Milestone::new(
                        MilestoneKind::Streak,
                        streak,
                        format!("{streak}-day streak, keep it going!"),
                    ));
                }
            }
            Err(e) => warn!(patient_id, error = %e, "Recent completion lookup failed"),
        }

        for milestone in &milestones {
            self.celebrate(patient_id, milestone).await;
        }

        if completion.is_high_pain() {
            self.alert_clinician(completion).await;
        }

        milestones
    }

    async fn celebrate(&self, patient_id: &str, milestone: &Milestone) {
        let request = SendRequest {
            user_id: patient_id.to_string(),
            kind: "exercise_milestone".to_string(),
            title: "Milestone reached!".to_string(),
            body: milestone.description.clone(),
            data: json!({
                "milestoneType": milestone.kind.as_str(),
                "value": milestone.value,
                "url": "/exercises",
            }),
        };
        if let Err(e) = self.api.send_notification(&request).await {
            warn!(patient_id, kind = %milestone.kind, error = %e, "Milestone notification failed");
        }
    }

    /// High-pain completions alert the prescribing clinician regardless
    /// of milestone status.
    async fn alert_clinician(&self, completion: &ExerciseCompletion) {
        let Some(therapist_id) = completion.therapist_id.as_deref() else {
            warn!(
                completion_id = %completion.id,
                "High pain reported but no clinician on completion"
            );
            return;
        };
        let request = SendRequest {
            user_id: therapist_id.to_string(),
            kind: "high_pain_alert".to_string(),
            title: "High pain reported".to_string(),
            body: format!(
                "A patient reported pain level {} during an exercise",
                completion.pain_level.unwrap_or_default()
            ),
            data: json!({
                "patientId": completion.patient_id,
                "prescriptionId": completion.prescription_id,
                "completionId": completion.id,
                "painLevel": completion.pain_level,
                "url": format!("/patients/{}", completion.patient_id),
            }),
        };
        if let Err(e) = self.api.send_notification(&request).await {
            warn!(therapist_id, error = %e, "High pain alert failed");
        }
    }
}
