#![deny(missing_docs)]
//! Baidu Qianfan (Wenxin) chat-completion provider.
//!
//! [`WenxinQianfan`] implements [`wenxin_types::Llm`]. For each prompt it
//! appends a user message to its conversation, posts the full history through
//! a [`wenxin_types::Transport`], and folds the line-oriented response into a
//! single [`wenxin_types::GenerationChunk`].

pub mod client;
pub mod config;
mod error;
pub mod mapping;
pub mod streaming;
pub mod transport;
pub mod types;

pub use client::{LLM_TYPE, WenxinQianfan};
pub use config::{ConfigError, WenxinConfig};
pub use streaming::{ChunkAggregator, aggregate, stream_line_to_chunk};
pub use transport::HttpTransport;
