//! # beacon-core
//!
//! Core crate for Beacon, the offline-resilient notification delivery and
//! reminder-scheduling engine. Contains configuration schemas and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Beacon crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::AppError;
pub use result::AppResult;
