//! # beacon-engine
//!
//! The server-side half of Beacon: computing when exercise reminders
//! should fire and whether a completion event crossed a milestone
//! threshold. Both run in the ordinary request/response world of the
//! backend and talk to the delivery side only through its HTTP API.

pub mod milestones;
pub mod reminders;
pub mod source;

pub use milestones::MilestoneEngine;
pub use reminders::{ReminderScheduler, ScheduleReport};
pub use source::{BackendCompletionSource, CompletionSource};
