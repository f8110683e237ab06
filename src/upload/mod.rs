//! Client for the mclo.gs log submission endpoint
//!
//! One `POST {base}/1/log` per call with the log as the form field `content`.
//! The response is interpreted by status:
//!
//! | status | result                                              |
//! |--------|-----------------------------------------------------|
//! | 200    | JSON body, `success` decides accept/reject          |
//! | 429    | [`UploadError::RateLimited`] with `Retry-After`     |
//! | other  | [`UploadError::Http`] with the start of the body    |
//!
//! Nothing is retried here; rate limits and transient failures go back to the
//! user.

mod models;

pub use models::{LogResponse, UploadedLog};

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::UploadError;
use crate::humanize::ByteSize;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

pub const DEFAULT_API_BASE: &str = "https://api.mclo.gs";
const LOG_ENDPOINT: &str = "/1/log";
const ERROR_BODY_PREVIEW_CHARS: usize = 120;
const UNKNOWN_FAILURE: &str = "Upload failed (unknown cause)";

/// Submits log text and returns where it can be viewed
#[async_trait]
pub trait LogUploader: Send + Sync {
    async fn upload(&self, content: &str) -> Result<UploadedLog, UploadError>;
}

pub struct UploadClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    warn_content_bytes: Option<ByteSize>,
}

impl UploadClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str) -> Self {
        Self {
            transport,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), LOG_ENDPOINT),
            warn_content_bytes: None,
        }
    }

    /// Log a warning for content above `limit`. The content is still sent.
    pub fn with_size_warning(mut self, limit: ByteSize) -> Self {
        self.warn_content_bytes = Some(limit);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LogUploader for UploadClient {
    async fn upload(&self, content: &str) -> Result<UploadedLog, UploadError> {
        let size = ByteSize(content.len() as u64);
        if let Some(limit) = self.warn_content_bytes {
            if size > limit {
                warn!(%size, %limit, "Log content is larger than the configured warning size");
            }
        }

        let body = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("content", content)
            .finish();

        debug!(endpoint = %self.endpoint, %size, "Uploading log");

        let response = self
            .transport
            .request(HttpRequest::post_form(&self.endpoint, body))
            .await
            .map_err(|e| {
                warn!(error = %e, "Upload failed without response");
                UploadError::Network(e.to_string())
            })?;

        let result = interpret_response(&response);
        match &result {
            Ok(log) => info!(url = %log.url, id = %log.id, "Log uploaded"),
            Err(e) => warn!(status = response.status, kind = %e.kind(), error = %e, "Upload rejected"),
        }
        result
    }
}

fn interpret_response(response: &HttpResponse) -> Result<UploadedLog, UploadError> {
    match response.status {
        200 => parse_success_body(&response.body.as_text()),
        429 => Err(UploadError::RateLimited {
            retry_after: response.header("retry-after").and_then(parse_retry_after),
        }),
        status => Err(UploadError::Http {
            status,
            body: response
                .body
                .as_text()
                .chars()
                .take(ERROR_BODY_PREVIEW_CHARS)
                .collect(),
        }),
    }
}

fn parse_success_body(text: &str) -> Result<UploadedLog, UploadError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| UploadError::MalformedResponse(e.to_string()))?;
    let payload = LogResponse::from_value(&value);

    if !payload.success {
        return Err(UploadError::UploadRejected(
            payload.error.unwrap_or_else(|| UNKNOWN_FAILURE.to_string()),
        ));
    }

    match (payload.url, payload.id) {
        (Some(url), Some(id)) => Ok(UploadedLog { url, id }),
        _ => Err(UploadError::MalformedResponse(
            "success response without url or id".to_string(),
        )),
    }
}

/// Seconds from a `Retry-After` value; the HTTP-date form yields `None`.
fn parse_retry_after(value: &str) -> Option<u64> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
