//! Conversation and generation types shared by every provider.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// The role of a message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human user.
    User,
    /// AI assistant.
    Assistant,
    /// System instructions.
    System,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl Message {
    /// A message from the user.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A message from the assistant.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// A system instruction.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// The ordered message history of one logical conversation.
///
/// Insertion order is significant and entries are never deduplicated or
/// pruned. A state is not shared: each concurrent conversation owns its own
/// instance, and cloning one yields an independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    /// An empty conversation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the end of the history.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages in the history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every message, starting a fresh conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl From<Vec<Message>> for ConversationState {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

/// One incremental piece of generated text.
///
/// `generation_info` carries optional provider metadata (token usage and the
/// like). Chunks are combined with `+`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationChunk {
    /// Generated text. May be empty.
    pub text: String,
    /// Provider metadata attached to this chunk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_info: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GenerationChunk {
    /// A chunk with text and no metadata.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generation_info: None,
        }
    }
}

impl Add for GenerationChunk {
    type Output = GenerationChunk;

    /// Merge `rhs` onto the end of this chunk.
    ///
    /// Text is concatenated in order. Metadata maps are merged key-wise and
    /// `rhs` wins on conflicting keys.
    fn add(mut self, rhs: GenerationChunk) -> Self::Output {
        self.text.push_str(&rhs.text);
        self.generation_info = match (self.generation_info, rhs.generation_info) {
            (Some(mut left), Some(right)) => {
                left.extend(right);
                Some(left)
            }
            (left, None) => left,
            (None, right) => right,
        };
        self
    }
}

/// The result of a batch `generate` call: one folded chunk per prompt,
/// in prompt-submission order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmResult {
    /// Final chunk for each prompt, indexed like the input prompts.
    pub generations: Vec<GenerationChunk>,
}

impl LlmResult {
    /// Number of prompts answered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether the batch was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// The generated text for each prompt.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.generations.iter().map(|g| g.text.as_str())
    }
}
