//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Current depth of each durable queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueDepths {
    pub pending_exercises: u64,
    pub pending_notifications: u64,
    pub status_updates: u64,
}

/// Health probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `"ok"` or `"degraded"`.
    pub status: String,
    /// Whether the queue store answers.
    pub store: bool,
    /// Whether the clinic backend is reachable.
    pub backend: bool,
}
