//! Health and status payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response body of `GET /api/health`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Empty when the backend leaves it out.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub system_info: Option<Value>,
    #[serde(default)]
    pub swarm_status: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
