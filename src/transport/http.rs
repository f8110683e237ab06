//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::{Client, Proxy};
use std::time::Duration;
use tracing::debug;

use super::{HttpRequest, HttpResponse, HttpTransport, ResponseBody, ResponseType, TransportError};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            user_agent: concat!("mclogs-uploader/", env!("CARGO_PKG_VERSION")).to_string(),
            proxy: None,
        }
    }
}

/// Transport used outside of tests
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(url) = config.proxy.as_deref() {
            let proxy = Proxy::all(url)
                .map_err(|e| TransportError::InvalidRequest(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_builder() {
        TransportError::InvalidRequest(e.to_string())
    } else {
        TransportError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();

        // A body that breaks off mid-stream counts as no response.
        let body = match request.response_type {
            ResponseType::Text => ResponseBody::Text(response.text().await.map_err(|e| {
                TransportError::RequestFailed(format!("Failed to read body: {}", e))
            })?),
            ResponseType::Binary => ResponseBody::Binary(response.bytes().await.map_err(|e| {
                TransportError::RequestFailed(format!("Failed to read body: {}", e))
            })?),
        };

        debug!(url = %request.url, status, size = body.len(), "Response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
