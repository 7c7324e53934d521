use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::locale::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the visible transcript. `id` and `created_at` are local
/// to the panel and never sent to the assistant service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(id: String, role: MessageRole, content: String) -> Self {
        Self { id, role, content, created_at: Utc::now() }
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

/// Body of `POST /ai/insights`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightRequest {
    pub language: Language,
}

/// Response of `POST /ai/insights`; only `message` is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InsightResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /ai/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    pub language: Language,
}

/// Response of `POST /ai/chat`. Every field is optional; the reply text is
/// picked by [`crate::service::conversation::reply_text`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
}
