//! Integration test entry point.

mod helpers;

mod delivery_test;
mod engine_test;
mod sync_test;
