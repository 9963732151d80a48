//! Reminder instant computation and scheduling.

use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use serde_json::json;
use tracing::{debug, warn};

use beacon_client::{NotifyApi, ScheduleRequest};
use beacon_core::result::AppResult;
use beacon_entity::prescription::ExercisePrescription;

/// Reminder times used when a prescription does not carry its own.
pub const DEFAULT_REMINDER_TIMES: [&str; 3] = ["09:00", "15:00", "21:00"];

/// Map a weekly frequency to the set of weekdays that carry reminders.
pub fn reminder_weekdays(frequency_per_week: u32) -> &'static [Weekday] {
    use Weekday::*;
    match frequency_per_week {
        7.. => &[Mon, Tue, Wed, Thu, Fri, Sat, Sun],
        5 | 6 => &[Mon, Tue, Wed, Thu, Fri],
        3 | 4 => &[Mon, Wed, Fri],
        2 => &[Tue, Fri],
        1 => &[Wed],
        0 => &[],
    }
}

/// Compute every future reminder instant for a prescription.
///
/// Walks each calendar day of the prescription span, keeps the days the
/// weekly frequency qualifies, and on each qualifying day takes the
/// first `frequency_per_day` reminder times. Instants at or before `now`
/// are dropped, which is what makes re-running this idempotent: past
/// reminders are never re-scheduled.
pub fn compute_reminders(
    prescription: &ExercisePrescription,
    now: DateTime<Utc>,
) -> Vec<DateTime<Utc>> {
    let weekdays = reminder_weekdays(prescription.frequency_per_week);
    if weekdays.is_empty() {
        return Vec::new();
    }

    let times: Vec<NaiveTime> = if prescription.reminder_times.is_empty() {
        DEFAULT_REMINDER_TIMES
            .iter()
            .filter_map(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
            .collect()
    } else {
        prescription
            .reminder_times
            .iter()
            .filter_map(|t| match NaiveTime::parse_from_str(t, "%H:%M") {
                Ok(time) => Some(time),
                Err(_) => {
                    warn!(time = %t, prescription_id = %prescription.id, "Skipping unparseable reminder time");
                    None
                }
            })
            .collect()
    };

    let per_day = prescription.frequency_per_day as usize;
    let end = prescription.effective_end_date();

    let mut instants = Vec::new();
    let mut day = prescription.start_date;
    while day <= end {
        if weekdays.contains(&day.weekday()) {
            for time in times.iter().take(per_day) {
                let instant = day.and_time(*time).and_utc();
                if instant > now {
                    instants.push(instant);
                }
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    instants
}

/// Outcome of scheduling one prescription's reminder calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct ScheduleReport {
    /// Scheduling requests accepted by the backend.
    pub scheduled: usize,
    /// Requests that failed. Not retried; the next scheduling pass for
    /// this prescription covers them.
    pub failed: usize,
}

/// Requests server-side scheduling for every computed reminder instant.
#[derive(Clone)]
pub struct ReminderScheduler {
    api: Arc<dyn NotifyApi>,
}

impl ReminderScheduler {
    pub fn new(api: Arc<dyn NotifyApi>) -> Self {
        Self { api }
    }

    /// Schedule the full reminder calendar for a prescription. Endpoint
    /// failures are logged and counted, never propagated.
    pub async fn schedule(&self, prescription: &ExercisePrescription) -> AppResult<ScheduleReport> {
        let instants = compute_reminders(prescription, Utc::now());
        debug!(
            prescription_id = %prescription.id,
            instants = instants.len(),
            "Computed reminder calendar"
        );

        let mut report = ScheduleReport::default();
        for instant in instants {
            let request = ScheduleRequest {
                user_id: prescription.patient_id.clone(),
                kind: "exercise_reminder".to_string(),
                schedule_at: instant,
                data: json!({
                    "prescriptionId": prescription.id,
                    "exerciseId": prescription.exercise_id,
                    "exerciseName": prescription.exercise_name,
                    "url": "/exercises",
                }),
            };
            match self.api.schedule_notification(&request).await {
                Ok(()) => report.scheduled += 1,
                Err(e) => {
                    warn!(
                        prescription_id = %prescription.id,
                        schedule_at = %instant,
                        error = %e,
                        "Reminder scheduling request failed"
                    );
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }
}
