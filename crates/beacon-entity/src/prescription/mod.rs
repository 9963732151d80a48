//! Exercise prescription entities.

pub mod model;

pub use model::ExercisePrescription;
