//! HTTP handlers, one module per concern.

pub mod delivery;
pub mod engine;
pub mod sync;
pub mod system;
