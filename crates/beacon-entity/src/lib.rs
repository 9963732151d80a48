//! # beacon-entity
//!
//! Domain entity models for Beacon. Every struct in this crate represents
//! a wire payload or a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`. Payloads that cross the push
//! channel use camelCase field names; everything else stays snake_case.

pub mod completion;
pub mod milestone;
pub mod notification;
pub mod prescription;
