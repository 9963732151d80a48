//! Backend endpoint configuration.

use serde::{Deserialize, Serialize};

/// Endpoints of the platform backend that Beacon calls out to.
///
/// The backend owns the push transport and long-term history; Beacon only
/// speaks to it over these HTTP contracts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL for the REST API (`/api/...` routes).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL for the serverless functions (`/functions/...` routes).
    #[serde(default = "default_functions_base_url")]
    pub functions_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            functions_base_url: default_functions_base_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_functions_base_url() -> String {
    "http://localhost:3000/functions".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
