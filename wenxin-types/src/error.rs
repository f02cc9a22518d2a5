//! Error types for the transport, the stream aggregator and batch generation.

use std::time::Duration;

/// Errors from the HTTP transport collaborator.
///
/// The adapter never produces these itself; it only propagates them.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network-level error (connection reset, DNS failure, TLS, etc.).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },
    /// Any other transport failure.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Whether the failure looks transient.
    ///
    /// Purely informational: nothing in this workspace retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Http { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Other(_) => false,
        }
    }
}

/// Errors from folding one prompt's raw response into a single chunk.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    /// A non-blank line could not be decoded as a JSON object.
    #[error("malformed stream line {line:?}: {source}")]
    Parse {
        /// The offending line, as received.
        line: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The response held no usable line at all.
    #[error("response produced no generation chunks")]
    EmptyGeneration,
}

/// Errors from a batch `generate` call.
///
/// Every variant names the index of the prompt that failed. The first failure
/// aborts the whole batch.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The transport failed for this prompt.
    #[error("prompt {prompt_index}: transport failed: {source}")]
    Transport {
        /// Index of the failing prompt.
        prompt_index: usize,
        /// Underlying transport error.
        #[source]
        source: TransportError,
    },
    /// A response line for this prompt was not valid JSON.
    #[error("prompt {prompt_index}: malformed stream line {line:?}: {source}")]
    Parse {
        /// Index of the failing prompt.
        prompt_index: usize,
        /// The offending line.
        line: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// The response for this prompt contained no usable lines.
    #[error("prompt {prompt_index}: response produced no generation chunks")]
    EmptyGeneration {
        /// Index of the failing prompt.
        prompt_index: usize,
    },
}

impl LlmError {
    /// Attach a prompt index to an aggregation failure.
    #[must_use]
    pub fn from_aggregate(prompt_index: usize, err: AggregateError) -> Self {
        match err {
            AggregateError::Parse { line, source } => Self::Parse {
                prompt_index,
                line,
                source,
            },
            AggregateError::EmptyGeneration => Self::EmptyGeneration { prompt_index },
        }
    }

    /// Attach a prompt index to a transport failure.
    #[must_use]
    pub fn from_transport(prompt_index: usize, source: TransportError) -> Self {
        Self::Transport {
            prompt_index,
            source,
        }
    }

    /// Index of the prompt that failed.
    #[must_use]
    pub fn prompt_index(&self) -> usize {
        match self {
            Self::Transport { prompt_index, .. }
            | Self::Parse { prompt_index, .. }
            | Self::EmptyGeneration { prompt_index } => *prompt_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not json").unwrap_err()
    }

    #[test]
    fn transport_error_display() {
        let err = TransportError::Http {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
        assert_eq!(
            TransportError::Timeout(Duration::from_secs(3)).to_string(),
            "timeout after 3s"
        );
    }

    #[test]
    fn transport_error_retryable() {
        let http = |status| TransportError::Http {
            status,
            body: String::new(),
        };
        assert!(http(500).is_retryable());
        assert!(http(503).is_retryable());
        assert!(http(429).is_retryable());
        assert!(!http(400).is_retryable());
        assert!(!http(401).is_retryable());
        assert!(TransportError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!TransportError::Other("boom".into()).is_retryable());
    }

    #[test]
    fn from_aggregate_keeps_line() {
        let err = LlmError::from_aggregate(
            2,
            AggregateError::Parse {
                line: "not json".into(),
                source: json_error(),
            },
        );
        assert_eq!(err.prompt_index(), 2);
        assert!(matches!(&err, LlmError::Parse { line, .. } if line == "not json"));
        assert!(err.to_string().starts_with("prompt 2: malformed stream line"));
    }

    #[test]
    fn from_aggregate_empty() {
        let err = LlmError::from_aggregate(0, AggregateError::EmptyGeneration);
        assert!(matches!(err, LlmError::EmptyGeneration { prompt_index: 0 }));
    }

    #[test]
    fn transport_source_is_chained() {
        use std::error::Error;

        let err = LlmError::from_transport(1, TransportError::Timeout(Duration::from_secs(5)));
        assert_eq!(err.prompt_index(), 1);
        let source = err.source().expect("has source");
        assert_eq!(source.to_string(), "timeout after 5s");
    }
}
