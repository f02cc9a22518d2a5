//! Internal error helpers for mapping HTTP/reqwest errors to [`TransportError`].

use std::time::Duration;

use wenxin_types::TransportError;

/// Map a non-success HTTP status from the Qianfan API to a [`TransportError`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> TransportError {
    TransportError::Http {
        status: status.as_u16(),
        body: body.to_string(),
    }
}

/// Map a [`reqwest::Error`] to a [`TransportError`].
///
/// `timeout` is the configured request timeout, reported back on expiry.
pub(crate) fn map_reqwest_error(err: reqwest::Error, timeout: Option<Duration>) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout.unwrap_or_default())
    } else {
        TransportError::Network(Box::new(err))
    }
}
