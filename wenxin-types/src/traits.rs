//! Capability traits: the [`Llm`] a host calls and the [`Transport`] a
//! provider calls through.
//!
//! Both traits use RPITIT (return-position `impl Trait` in traits) and are
//! NOT object-safe. Hosts are generic over them.

use std::future::Future;

use crate::error::{LlmError, TransportError};
use crate::types::LlmResult;

/// The HTTP collaborator a provider posts its payloads through.
///
/// Implementations own connection handling, TLS, timeouts and headers. The
/// provider supplies a complete URL and a JSON payload and expects the raw
/// response body back.
pub trait Transport: Send + Sync {
    /// POST `payload` as JSON to `url` and return the response body text.
    fn post(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// A language model that answers a batch of prompts.
///
/// `generate` takes `&mut self` because a model may accumulate conversation
/// state across calls. One conversation is driven by one caller at a time.
pub trait Llm: Send {
    /// Short identifier used by hosts for dispatch (e.g. `"wenxin"`).
    fn llm_type(&self) -> &str;

    /// Answer every prompt in order, one result per prompt.
    ///
    /// Prompts are processed sequentially. The first failure aborts the batch
    /// and reports the index of the failing prompt. `stop` sequences may be
    /// ignored by implementations that do not support them.
    fn generate(
        &mut self,
        prompts: &[String],
        stop: Option<&[String]>,
    ) -> impl Future<Output = Result<LlmResult, LlmError>> + Send;
}
