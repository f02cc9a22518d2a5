//! Request building: conversation state plus config into a [`ChatRequest`].

use wenxin_types::{ConversationState, Message};

use crate::config::WenxinConfig;
use crate::types::ChatRequest;

/// Append `prompt` as a user message and snapshot the whole conversation.
///
/// History accumulates across calls with no deduplication or pruning. The
/// returned request carries every message in `conversation`, not just the new
/// one. Empty prompts are accepted.
pub fn append_and_build(
    conversation: &mut ConversationState,
    prompt: &str,
    config: &WenxinConfig,
) -> ChatRequest {
    conversation.push(Message::user(prompt));
    build_request(conversation, config)
}

/// Snapshot `conversation` into a request without modifying it.
#[must_use]
pub fn build_request(conversation: &ConversationState, config: &WenxinConfig) -> ChatRequest {
    ChatRequest {
        temperature: config.temperature,
        messages: conversation.messages().to_vec(),
        max_length: config.max_tokens,
        stream: config.stream,
        top_p: config.top_p,
        penalty_score: config.send_penalty_score.then_some(config.penalty_score),
    }
}

/// Serialize a request into the JSON value handed to the transport.
///
/// # Errors
///
/// Propagates `serde_json` serialization errors.
pub fn to_api_request(request: &ChatRequest) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(request)
}
