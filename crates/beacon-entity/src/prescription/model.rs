//! Exercise prescription model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A patient's exercise assignment. Created by a clinician in the main
/// application; read-only to the reminder scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExercisePrescription {
    /// Unique prescription identifier.
    pub id: String,
    /// The patient the exercise is assigned to.
    pub patient_id: String,
    /// The clinician who prescribed the exercise.
    pub therapist_id: String,
    /// The exercise being prescribed.
    pub exercise_id: String,
    /// Human-readable exercise name, used in reminder text.
    #[serde(default)]
    pub exercise_name: Option<String>,
    /// How many sessions per day.
    pub frequency_per_day: u32,
    /// How many days per week the exercise should be performed.
    pub frequency_per_week: u32,
    /// Prescription length in weeks, used when `end_date` is absent.
    pub duration_weeks: u32,
    /// First day of the prescription.
    pub start_date: NaiveDate,
    /// Last day of the prescription, inclusive. Defaults to
    /// `start_date + duration_weeks * 7 days` when absent.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Explicit reminder times as `"HH:MM"` strings. When empty, the
    /// scheduler falls back to its built-in defaults.
    #[serde(default)]
    pub reminder_times: Vec<String>,
}

impl ExercisePrescription {
    /// Resolve the last day reminders may land on. A derived end covers
    /// exactly `duration_weeks * 7` days starting at `start_date`.
    pub fn effective_end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or_else(|| {
            let days = (u64::from(self.duration_weeks) * 7).saturating_sub(1);
            self.start_date + chrono::Days::new(days)
        })
    }
}
