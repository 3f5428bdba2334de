//! Chat payloads for `POST /api/chat`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Assistant reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    /// Which backend pipeline answered, e.g. `"Enhanced Conversational Swarm"`.
    #[serde(default)]
    pub system_mode: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub user_context: Option<serde_json::Value>,
    #[serde(default)]
    pub conversation_metadata: Option<ConversationMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationMetadata {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub conversation_count: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}
