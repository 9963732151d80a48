//! Milestone model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of achievement a milestone represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    /// Lifetime completion total hit a checkpoint.
    TotalCount,
    /// Exactly seven completions since the start of the calendar week.
    WeeklyGoal,
    /// Consecutive-day streak hit a checkpoint.
    Streak,
}

impl MilestoneKind {
    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TotalCount => "total_count",
            Self::WeeklyGoal => "weekly_goal",
            Self::Streak => "streak",
        }
    }
}

impl fmt::Display for MilestoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected achievement. Ephemeral: exists only long enough to produce
/// a celebratory notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    /// What kind of threshold was crossed.
    #[serde(rename = "type")]
    pub kind: MilestoneKind,
    /// The threshold value reached.
    pub value: u32,
    /// Human-readable description used in the notification body.
    pub description: String,
}

impl Milestone {
    pub fn new(kind: MilestoneKind, value: u32, description: impl Into<String>) -> Self {
        Self {
            kind,
            value,
            description: description.into(),
        }
    }
}
