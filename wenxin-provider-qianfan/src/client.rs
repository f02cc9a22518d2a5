//! Qianfan client struct, builder, and [`Llm`] implementation.

use std::future::Future;

use wenxin_types::{ConversationState, Llm, LlmError, LlmResult, Transport, TransportError};

use crate::config::{ConfigError, WenxinConfig};
use crate::mapping::{append_and_build, to_api_request};
use crate::streaming::aggregate;
use crate::transport::HttpTransport;

/// Identifier reported by [`Llm::llm_type`].
pub const LLM_TYPE: &str = "wenxin";

/// Client for the Baidu Qianfan (Wenxin) chat-completions API.
///
/// Owns one conversation: every prompt passed to [`Llm::generate`] is appended
/// to it and the whole history is sent with each call. Drive one instance per
/// conversation; use [`reset_conversation`](Self::reset_conversation) or a
/// fresh instance to start over.
///
/// # Example
///
/// ```no_run
/// use wenxin_provider_qianfan::WenxinQianfan;
///
/// let client = WenxinQianfan::new()
///     .access_token("24.abc")
///     .temperature(0.5)
///     .max_tokens(1024);
/// ```
pub struct WenxinQianfan<T = HttpTransport> {
    /// Endpoint and sampling parameters.
    pub(crate) config: WenxinConfig,
    /// Accumulated history of this conversation.
    pub(crate) conversation: ConversationState,
    /// HTTP collaborator.
    pub(crate) transport: T,
}

impl WenxinQianfan<HttpTransport> {
    /// Create a client with default configuration and an empty access token.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WenxinConfig::default())
    }

    /// Create a client from `WENXIN_ACCESS_TOKEN` and `WENXIN_ENDPOINT_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when the access token is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::with_config(WenxinConfig::from_env()?))
    }

    /// Create a client from an explicit configuration.
    #[must_use]
    pub fn with_config(config: WenxinConfig) -> Self {
        Self {
            config,
            conversation: ConversationState::new(),
            transport: HttpTransport::new(),
        }
    }
}

impl Default for WenxinQianfan<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WenxinQianfan<T> {
    /// Swap the transport, keeping configuration and conversation.
    #[must_use]
    pub fn with_transport<U: Transport>(self, transport: U) -> WenxinQianfan<U> {
        WenxinQianfan {
            config: self.config,
            conversation: self.conversation,
            transport,
        }
    }

    /// Continue an existing conversation.
    #[must_use]
    pub fn with_conversation(mut self, conversation: ConversationState) -> Self {
        self.conversation = conversation;
        self
    }

    /// Set the access token appended to the endpoint URL.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = token.into();
        self
    }

    /// Override the endpoint URL prefix.
    #[must_use]
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint_url = url.into();
        self
    }

    /// Sampling temperature. Not range-checked.
    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Maximum generated tokens.
    #[must_use]
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    /// Nucleus sampling. Not range-checked.
    #[must_use]
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.config.top_p = top_p;
        self
    }

    /// Repetition penalty. Only sent when [`send_penalty_score`](Self::send_penalty_score) is on.
    #[must_use]
    pub fn penalty_score(mut self, penalty_score: f64) -> Self {
        self.config.penalty_score = penalty_score;
        self
    }

    /// Include `penalty_score` in the request payload.
    #[must_use]
    pub fn send_penalty_score(mut self, send: bool) -> Self {
        self.config.send_penalty_score = send;
        self
    }

    /// Ask the service to stream.
    #[must_use]
    pub fn stream(mut self, stream: bool) -> Self {
        self.config.stream = stream;
        self
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &WenxinConfig {
        &self.config
    }

    /// History accumulated so far.
    #[must_use]
    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Forget the history.
    pub fn reset_conversation(&mut self) {
        self.conversation.clear();
    }

    /// Consume the client, returning its history.
    #[must_use]
    pub fn into_conversation(self) -> ConversationState {
        self.conversation
    }
}

impl<T: Transport> WenxinQianfan<T> {
    /// Append `prompt` to the conversation, post the history, and return the
    /// raw response body.
    ///
    /// The prompt stays in the history even if the call fails.
    ///
    /// # Errors
    ///
    /// Propagates the transport's error unchanged.
    pub async fn create_stream(&mut self, prompt: &str) -> Result<String, TransportError> {
        let request = append_and_build(&mut self.conversation, prompt, &self.config);
        let payload =
            to_api_request(&request).map_err(|e| TransportError::Other(Box::new(e)))?;
        let url = self.config.chat_url();

        tracing::debug!(
            messages = request.messages.len(),
            payload = %payload,
            "sending chat request to Qianfan"
        );

        let response = self.transport.post(&url, &payload).await?;

        tracing::debug!(bytes = response.len(), response = %response, "received Qianfan response");
        Ok(response)
    }
}

impl<T: Transport> Llm for WenxinQianfan<T> {
    fn llm_type(&self) -> &str {
        LLM_TYPE
    }

    /// Answer each prompt in turn.
    ///
    /// `stop` is accepted for interface compatibility and ignored.
    fn generate(
        &mut self,
        prompts: &[String],
        _stop: Option<&[String]>,
    ) -> impl Future<Output = Result<LlmResult, LlmError>> + Send {
        async move {
            let mut generations = Vec::with_capacity(prompts.len());

            for (index, prompt) in prompts.iter().enumerate() {
                let raw = self.create_stream(prompt).await.map_err(|e| {
                    tracing::warn!(prompt_index = index, error = %e, "Qianfan request failed");
                    LlmError::from_transport(index, e)
                })?;

                let chunk = aggregate(&raw).map_err(|e| {
                    tracing::warn!(prompt_index = index, error = %e, "could not aggregate Qianfan response");
                    LlmError::from_aggregate(index, e)
                })?;

                generations.push(chunk);
            }

            Ok(LlmResult { generations })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENDPOINT_URL;
    use wenxin_types::test_utils::ScriptedTransport;
    use wenxin_types::{Message, Role};

    fn prompts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn llm_type_is_wenxin() {
        assert_eq!(WenxinQianfan::new().llm_type(), "wenxin");
    }

    #[test]
    fn default_matches_new() {
        let client = WenxinQianfan::default();
        assert_eq!(client.config, WenxinConfig::default());
        assert!(client.conversation.is_empty());
    }

    #[test]
    fn builder_overrides() {
        let client = WenxinQianfan::new()
            .access_token("tok")
            .endpoint_url("http://localhost/chat?access_token=")
            .temperature(0.2)
            .max_tokens(16)
            .top_p(0.5)
            .penalty_score(1.1)
            .send_penalty_score(true)
            .stream(true);

        let config = client.config();
        assert_eq!(config.chat_url(), "http://localhost/chat?access_token=tok");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 16);
        assert_eq!(config.top_p, 0.5);
        assert_eq!(config.penalty_score, 1.1);
        assert!(config.send_penalty_score);
        assert!(config.stream);
    }

    #[test]
    fn with_transport_keeps_state() {
        let client = WenxinQianfan::new()
            .access_token("tok")
            .with_conversation(ConversationState::from(vec![Message::user("earlier")]))
            .with_transport(ScriptedTransport::new());
        assert_eq!(client.config.access_token, "tok");
        assert_eq!(client.conversation().len(), 1);
    }

    #[tokio::test]
    async fn create_stream_posts_history_to_token_url() {
        let transport = ScriptedTransport::with_responses(["raw-1", "raw-2"]);
        let mut client = WenxinQianfan::new()
            .access_token("abc")
            .with_transport(transport);

        assert_eq!(client.create_stream("one").await.unwrap(), "raw-1");
        assert_eq!(client.create_stream("two").await.unwrap(), "raw-2");

        let requests = client.transport.requests();
        assert_eq!(requests[0].url, format!("{DEFAULT_ENDPOINT_URL}abc"));
        assert_eq!(requests[0].payload["messages"].as_array().unwrap().len(), 1);
        assert_eq!(requests[1].payload["messages"].as_array().unwrap().len(), 2);
        assert_eq!(requests[1].payload["messages"][1]["content"], "two");
    }

    #[tokio::test]
    async fn generate_folds_each_prompt() {
        let transport = ScriptedTransport::with_responses([
            "data:{\"result\":\"Hel\"}\n\ndata:{\"result\":\"lo\"}\n",
            "data:{\"result\":\"second\"}\n",
        ]);
        let mut client = WenxinQianfan::new().with_transport(transport);

        let result = client.generate(&prompts(&["p1", "p2"]), None).await.unwrap();

        assert_eq!(result.texts().collect::<Vec<_>>(), vec!["Hello", "second"]);
        assert_eq!(client.conversation().len(), 2);
        assert!(client.conversation().messages().iter().all(|m| m.role == Role::User));
    }

    #[tokio::test]
    async fn stop_sequences_are_ignored() {
        let transport = ScriptedTransport::with_responses(["{\"result\":\"x\"}"]);
        let mut client = WenxinQianfan::new().with_transport(transport);
        let stop = prompts(&["\n"]);
        let result = client.generate(&prompts(&["p"]), Some(stop.as_slice())).await.unwrap();
        assert_eq!(result.generations[0].text, "x");
        assert!(client.transport.requests()[0].payload.get("stop").is_none());
    }

    #[tokio::test]
    async fn empty_batch_makes_no_calls() {
        let mut client = WenxinQianfan::new().with_transport(ScriptedTransport::new());
        let result = client.generate(&[], None).await.unwrap();
        assert!(result.is_empty());
        assert!(client.transport.requests().is_empty());
        assert!(client.conversation().is_empty());
    }

    #[tokio::test]
    async fn empty_response_fails_with_index() {
        let transport = ScriptedTransport::with_responses(["{\"result\":\"ok\"}", "\n\n"]);
        let mut client = WenxinQianfan::new().with_transport(transport);

        let err = client
            .generate(&prompts(&["a", "b"]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyGeneration { prompt_index: 1 }));
    }

    #[tokio::test]
    async fn transport_error_aborts_batch() {
        let transport = ScriptedTransport::new();
        transport.push_error(TransportError::Http {
            status: 500,
            body: "down".into(),
        });
        transport.push_response("{\"result\":\"unused\"}");
        let mut client = WenxinQianfan::new().with_transport(transport);

        let err = client
            .generate(&prompts(&["a", "b"]), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LlmError::Transport {
                prompt_index: 0,
                source: TransportError::Http { status: 500, .. }
            }
        ));
        assert_eq!(client.transport.remaining(), 1);
        assert_eq!(client.conversation().len(), 1);
    }

    #[tokio::test]
    async fn reset_conversation_starts_fresh() {
        let transport = ScriptedTransport::with_responses(["{\"result\":\"1\"}", "{\"result\":\"2\"}"]);
        let mut client = WenxinQianfan::new().with_transport(transport);

        client.generate(&prompts(&["first"]), None).await.unwrap();
        client.reset_conversation();
        client.generate(&prompts(&["second"]), None).await.unwrap();

        let requests = client.transport.requests();
        assert_eq!(requests[1].payload["messages"].as_array().unwrap().len(), 1);
        assert_eq!(
            client.into_conversation().messages(),
            &[Message::user("second")]
        );
    }
}
