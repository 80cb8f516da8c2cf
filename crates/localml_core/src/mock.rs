//! In-memory [`HttpTransport`] for tests.
//!
//! Queued outcomes are handed out in order, one per request. Every request is
//! recorded so tests can inspect what was sent.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use anyhow::anyhow;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, Response, StatusCode, Uri};

use crate::transport::HttpTransport;

#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    body: Bytes,
}

impl MockResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: Bytes::new(),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Bytes::from(body.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub timeout: Option<Duration>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug)]
enum Outcome {
    Respond(MockResponse),
    Fail(String),
}

#[derive(Debug, Default)]
struct State {
    outcomes: VecDeque<Outcome>,
    requests: Vec<RecordedRequest>,
}

/// Cloning shares the queue and the request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: MockResponse) -> Self {
        self.lock().outcomes.push_back(Outcome::Respond(response));
        self
    }

    /// Queues a network-level failure carrying `message`.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.lock().outcomes.push_back(Outcome::Fail(message.into()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HttpTransport for MockTransport {
    fn execute(
        &self,
        request: Request<Vec<u8>>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Response<Bytes>> {
        let (parts, body) = request.into_parts();
        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            timeout,
        });

        match state.outcomes.pop_front() {
            Some(Outcome::Respond(response)) => Ok(Response::builder()
                .status(response.status)
                .body(response.body)?),
            Some(Outcome::Fail(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("connection refused: no response queued")),
        }
    }
}
