//! Exercise completion model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged exercise instance. Created by a patient action in the main
/// application; triggers the milestone engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCompletion {
    /// Unique completion identifier.
    pub id: String,
    /// The prescription this completion fulfils.
    pub prescription_id: String,
    /// The patient who logged the completion.
    pub patient_id: String,
    /// The prescribing clinician, target of high-pain alerts.
    #[serde(default)]
    pub therapist_id: Option<String>,
    /// When the exercise was performed.
    pub completed_at: DateTime<Utc>,
    /// Self-reported pain level, 0-10.
    #[serde(default)]
    pub pain_level: Option<u8>,
    /// Self-reported difficulty, 0-10.
    #[serde(default)]
    pub difficulty_rating: Option<u8>,
}

impl ExerciseCompletion {
    /// Whether the reported pain level warrants a clinician alert.
    pub fn is_high_pain(&self) -> bool {
        self.pain_level.map(|level| level >= 7).unwrap_or(false)
    }
}
