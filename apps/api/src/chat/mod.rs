//! Free-form supportive chat. Replies are sanitized but not journaled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::MonotonicClock;
use crate::errors::AppError;
use crate::llm_client::GenerativeBackend;
use crate::text::sanitize;

pub mod handlers;
pub mod prompts;

pub const UNABLE_TO_GENERATE_REPLY: &str = "Unable to generate reply";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub chat: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub chat: String,
    pub result_chat: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn reply(
    backend: &dyn GenerativeBackend,
    clock: &MonotonicClock,
    request: ChatRequest,
) -> Result<ChatResponse, AppError> {
    let chat = request
        .chat
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::Validation("chat is required".to_string()))?
        .to_string();

    // The whole reply is kept; only formatting is stripped.
    let result_chat = match backend.generate(&prompts::chat_prompt(&chat)).await {
        Ok(raw) => Some(sanitize(&raw)).filter(|r| !r.is_empty()),
        Err(e) => {
            warn!("Chat generation failed: {e}");
            None
        }
    }
    .unwrap_or_else(|| UNABLE_TO_GENERATE_REPLY.to_string());

    Ok(ChatResponse {
        chat,
        result_chat,
        timestamp: clock.now(),
    })
}
