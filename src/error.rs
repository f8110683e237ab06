//! Failure taxonomy for one upload run

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Every way an upload run can fail before a share URL exists.
///
/// Clipboard failures are deliberately absent: they only change the wording
/// of the success report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// No response at all (connection refused, DNS, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Non-200 status while downloading the source
    #[error("HTTP error! status: {status}")]
    Fetch { status: u16 },

    #[error("Gzip decompression failed: {0}")]
    Decompression(String),

    /// API answered 200 but the body was not JSON
    #[error("Malformed JSON from server: {0}")]
    MalformedResponse(String),

    /// API answered `{"success": false, ...}`
    #[error("{0}")]
    UploadRejected(String),

    #[error("{}", rate_limit_message(*retry_after))]
    RateLimited { retry_after: Option<u64> },

    /// Any other non-200 from the API; `body` is already truncated
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

fn rate_limit_message(retry_after: Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!("Rate limit exceeded - wait {secs}s and try again."),
        None => "Rate limit exceeded. Try again later.".to_string(),
    }
}

impl UploadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::Network(_) => ErrorKind::Network,
            UploadError::Fetch { .. } => ErrorKind::Fetch,
            UploadError::Decompression(_) => ErrorKind::Decompression,
            UploadError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            UploadError::UploadRejected(_) => ErrorKind::UploadRejected,
            UploadError::RateLimited { .. } => ErrorKind::RateLimited,
            UploadError::Http { .. } => ErrorKind::Http,
        }
    }
}

/// Field-less mirror of [`UploadError`], carried by [`UploadOutcome::Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Network,
    Fetch,
    Decompression,
    MalformedResponse,
    UploadRejected,
    RateLimited,
    Http,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Fetch => "FETCH_ERROR",
            ErrorKind::Decompression => "DECOMPRESSION_ERROR",
            ErrorKind::MalformedResponse => "MALFORMED_RESPONSE",
            ErrorKind::UploadRejected => "UPLOAD_REJECTED",
            ErrorKind::RateLimited => "RATE_LIMITED",
            ErrorKind::Http => "HTTP_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Terminal value of one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadOutcome {
    Success { url: String, id: String },
    Failure { reason: ErrorKind, detail: String },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }
}

impl From<UploadError> for UploadOutcome {
    fn from(err: UploadError) -> Self {
        UploadOutcome::Failure {
            reason: err.kind(),
            detail: err.to_string(),
        }
    }
}
