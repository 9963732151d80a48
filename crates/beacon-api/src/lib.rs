//! # beacon-api
//!
//! HTTP API layer for Beacon built on Axum. The relay side exposes the
//! push, interaction and sync endpoints; the engine side exposes
//! prescription scheduling and completion processing. Plus the usual
//! health and queue introspection.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
