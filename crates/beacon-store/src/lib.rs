//! # beacon-store
//!
//! Durable queue storage for Beacon, backed by an embedded SQLite
//! database. Each named queue is an append-only table of JSON payloads;
//! entries survive process termination and are removed only after a
//! successful replay. All writes run inside store-owned transactions so
//! concurrent handlers never coordinate locking themselves.

pub mod queue;
pub mod store;

pub use queue::{QueueEntry, QueueName};
pub use store::QueueStore;
