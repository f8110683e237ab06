//! Canned-response transport for tests and offline development

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// Replays queued responses in order and records every request it sees.
#[derive(Debug, Default)]
pub struct StubTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered request
    pub fn respond(self, response: HttpResponse) -> Self {
        self.push(Ok(response));
        self
    }

    /// Queue a transport failure for the next unanswered request
    pub fn fail(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, response: Result<HttpResponse, TransportError>) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::info!(method = %request.method, url = %request.url, "Stub request");
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(request);

        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::RequestFailed("no canned response".into())))
    }
}
