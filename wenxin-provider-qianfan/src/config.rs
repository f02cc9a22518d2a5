//! Static configuration for a Qianfan client.

/// Default chat-completions endpoint. The access token is appended verbatim.
pub const DEFAULT_ENDPOINT_URL: &str =
    "https://aip.baidubce.com/rpc/2.0/ai_custom/v1/wenxinworkshop/chat/completions?access_token=";

/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "WENXIN_ACCESS_TOKEN";

/// Environment variable overriding [`DEFAULT_ENDPOINT_URL`].
pub const ENDPOINT_URL_ENV: &str = "WENXIN_ENDPOINT_URL";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
}

/// Sampling parameters and endpoint for the Qianfan chat API.
///
/// Numeric fields are forwarded as-is. Out-of-range values (a temperature
/// above 10, a `top_p` above 1) are not rejected here; the service decides.
#[derive(Debug, Clone, PartialEq)]
pub struct WenxinConfig {
    /// Endpoint URL prefix. Defaults to [`DEFAULT_ENDPOINT_URL`].
    pub endpoint_url: String,
    /// Access token appended to `endpoint_url`. Defaults to empty.
    pub access_token: String,
    /// Sampling temperature, nominally 0 to 10. Defaults to 0.95.
    pub temperature: f64,
    /// Maximum generated tokens, sent as `max_length`. Defaults to 4096.
    pub max_tokens: u32,
    /// Nucleus sampling, nominally 0 to 1. Defaults to 1.0.
    pub top_p: f64,
    /// Repetition penalty. Defaults to 1.5.
    pub penalty_score: f64,
    /// Whether the service should stream. Defaults to `false`.
    pub stream: bool,
    /// Whether `penalty_score` is written into the payload. Defaults to `false`.
    pub send_penalty_score: bool,
}

impl Default for WenxinConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.into(),
            access_token: String::new(),
            temperature: 0.95,
            max_tokens: 4096,
            top_p: 1.0,
            penalty_score: 1.5,
            stream: false,
            send_penalty_score: false,
        }
    }
}

impl WenxinConfig {
    /// Load the access token (and optionally the endpoint) from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when `WENXIN_ACCESS_TOKEN` is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let access_token =
            lookup(ACCESS_TOKEN_ENV).ok_or(ConfigError::MissingVar(ACCESS_TOKEN_ENV))?;
        let mut config = Self {
            access_token,
            ..Self::default()
        };
        if let Some(url) = lookup(ENDPOINT_URL_ENV) {
            config.endpoint_url = url;
        }
        Ok(config)
    }

    /// Full request URL: the endpoint with the access token appended.
    #[must_use]
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.endpoint_url, self.access_token)
    }
}
