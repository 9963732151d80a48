//! Milestone entities.

pub mod model;

pub use model::{Milestone, MilestoneKind};
