//! reqwest-backed [`Transport`].

use std::time::Duration;

use wenxin_types::{Transport, TransportError};

use crate::error::{map_http_status, map_reqwest_error};

/// HTTP transport posting JSON with `Content-Type: application/json`.
///
/// Non-success statuses become [`TransportError::Http`] carrying the body.
/// There is no retry.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    /// Shared HTTP client.
    client: reqwest::Client,
    /// Per-request timeout, if any.
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// A transport with a fresh client and no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing client (connection pool, proxy settings, TLS config).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    /// Abort requests that take longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Transport for HttpTransport {
    fn post(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<String, TransportError>> + Send {
        let timeout = self.timeout;
        let mut request = self
            .client
            .post(url)
            .header("content-type", "application/json")
            .json(payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        async move {
            let response = request
                .send()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;

            if !status.is_success() {
                return Err(map_http_status(status, &body));
            }
            Ok(body)
        }
    }
}
