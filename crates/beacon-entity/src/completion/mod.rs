//! Exercise completion entities.

pub mod model;

pub use model::ExerciseCompletion;
