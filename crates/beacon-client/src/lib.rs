//! # beacon-client
//!
//! HTTP client for the clinic backend. The [`NotifyApi`] trait is the
//! single seam between Beacon and the backend; everything that talks to
//! the network goes through it, which is also what makes the rest of the
//! system testable with an in-memory fake.

pub mod api;
pub mod http;

pub use api::{EventReport, NotifyApi, ScheduleRequest, SendRequest};
pub use http::HttpNotifyApi;
