//! HTTP capability consumed by the fetcher and the upload client
//!
//! Both pipeline stages talk to the network only through [`HttpTransport`],
//! one awaited request per call. Production code uses [`ReqwestTransport`];
//! tests substitute canned responders.

pub mod http;
mod stub;

pub use http::{HttpConfig, ReqwestTransport};
pub use stub::StubTransport;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::HeaderMap;
use std::borrow::Cow;
use thiserror::Error;

/// Raised when no response was received at all
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("connection timeout")]
    Timeout,

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// How the caller wants the response body delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Text,
    Binary,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub response_type: ResponseType,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, response_type: ResponseType) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            response_type,
            headers: Vec::new(),
            body: None,
        }
    }

    /// POST with an `application/x-www-form-urlencoded` body
    pub fn post_form(url: impl Into<String>, body: String) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            response_type: ResponseType::Text,
            headers: vec![(
                reqwest::header::CONTENT_TYPE.to_string(),
                mime::APPLICATION_WWW_FORM_URLENCODED.to_string(),
            )],
            body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Text(String),
    Binary(Bytes),
}

impl ResponseBody {
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            ResponseBody::Text(text) => Cow::Borrowed(text),
            ResponseBody::Binary(bytes) => String::from_utf8_lossy(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ResponseBody::Text(text) => text.as_bytes(),
            ResponseBody::Binary(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            ResponseBody::Text(text) => Bytes::from(text),
            ResponseBody::Binary(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl HttpResponse {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: ResponseBody::Text(body.into()),
        }
    }

    pub fn binary(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: ResponseBody::Binary(body.into()),
        }
    }

    /// Header value as a string, if present and valid ASCII
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// A single request/response round trip
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
