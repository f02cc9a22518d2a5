//! Qianfan chat-completions wire types.
//!
//! Request body:
//! ```text
//! {"temperature":0.95,"messages":[{"role":"user","content":"hi"}],"max_length":4096,"stream":false,"top_p":1.0}
//! ```
//!
//! Response body, one object per line, optionally framed with `data:`:
//! ```text
//! data:{"id":"as-1","result":"Hel","is_end":false}
//! data:{"id":"as-1","result":"lo","is_end":true}
//! ```

use serde::{Deserialize, Serialize};
use wenxin_types::Message;

/// Chat-completions request body. A snapshot of the whole conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    /// Sampling temperature.
    pub temperature: f64,
    /// Every message in the conversation, oldest first.
    pub messages: Vec<Message>,
    /// Maximum generated tokens.
    pub max_length: u32,
    /// Whether the service should stream.
    pub stream: bool,
    /// Nucleus sampling.
    pub top_p: f64,
    /// Repetition penalty, present only when enabled in the config.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty_score: Option<f64>,
}

/// One decoded response line. Only `result` is recognised; other keys
/// (`id`, `is_end`, `usage`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub struct StreamLine {
    /// Text fragment. Missing or `null` means empty.
    #[serde(default)]
    pub result: Option<String>,
}
