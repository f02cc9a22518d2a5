//! ScriptedTransport — replays canned responses and records every request.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::error::TransportError;
use crate::traits::Transport;

/// A request observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// Target URL.
    pub url: String,
    /// JSON payload as posted.
    pub payload: serde_json::Value,
}

/// A [`Transport`] that answers from a FIFO script.
///
/// Once the script runs dry every call fails with [`TransportError::Other`].
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    /// An empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// A script that returns each body in turn.
    pub fn with_responses<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transport = Self::new();
        for body in bodies {
            transport.push_response(body);
        }
        transport
    }

    /// Queue a successful response body.
    pub fn push_response(&self, body: impl Into<String>) {
        self.lock_script().push_back(Ok(body.into()));
    }

    /// Queue a failure.
    pub fn push_error(&self, err: TransportError) {
        self.lock_script().push_back(Err(err));
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock_requests().clone()
    }

    /// Number of scripted responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lock_script().len()
    }

    // A poisoned lock only means a previous test panicked mid-call.
    fn lock_script(&self) -> MutexGuard<'_, VecDeque<Result<String, TransportError>>> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_requests(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Transport for ScriptedTransport {
    async fn post(&self, url: &str, payload: &serde_json::Value) -> Result<String, TransportError> {
        self.lock_requests().push(RecordedRequest {
            url: url.to_owned(),
            payload: payload.clone(),
        });
        self.lock_script()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("script exhausted".into())))
    }
}
