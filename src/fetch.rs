//! Downloading log content from a remote URL

use async_trait::async_trait;
use flate2::read::MultiGzDecoder;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::classify::is_gzip_log;
use crate::error::UploadError;
use crate::transport::{HttpRequest, HttpTransport, ResponseType};

/// Resolves a URL to the text that should be uploaded
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, UploadError>;
}

/// Fetches plain or `.log.gz` resources through an [`HttpTransport`].
///
/// A single attempt per call: a failed download fails the whole upload and
/// retrying is left to the user.
pub struct ContentFetcher {
    transport: Arc<dyn HttpTransport>,
}

impl ContentFetcher {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl SourceFetcher for ContentFetcher {
    async fn fetch(&self, url: &str) -> Result<String, UploadError> {
        let gzip = is_gzip_log(url);
        let response_type = if gzip {
            ResponseType::Binary
        } else {
            ResponseType::Text
        };

        debug!(url, gzip, "Fetching log content");

        let response = self
            .transport
            .request(HttpRequest::get(url, response_type))
            .await
            .map_err(|e| {
                warn!(url, error = %e, "Fetch failed without response");
                UploadError::Network(e.to_string())
            })?;

        if response.status != 200 {
            warn!(url, status = response.status, "Fetch returned non-200 status");
            return Err(UploadError::Fetch {
                status: response.status,
            });
        }

        if gzip {
            let compressed = response.body.into_bytes();
            let compressed_len = compressed.len();
            // CPU bound; runs on the blocking pool
            let text = tokio::task::spawn_blocking(move || gunzip(&compressed))
                .await
                .map_err(|e| UploadError::Decompression(e.to_string()))??;
            debug!(
                url,
                compressed = compressed_len,
                size = text.len(),
                "Decompressed gzip log"
            );
            Ok(text)
        } else {
            Ok(response.body.as_text().into_owned())
        }
    }
}

/// Inflate a gzip payload (multi-member streams included) into UTF-8 text.
/// Invalid UTF-8 sequences are replaced rather than rejected.
pub fn gunzip(compressed: &[u8]) -> Result<String, UploadError> {
    let mut decoder = MultiGzDecoder::new(compressed);
    let mut buf = Vec::new();
    decoder
        .read_to_end(&mut buf)
        .map_err(|e| UploadError::Decompression(e.to_string()))?;

    Ok(match String::from_utf8(buf) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpResponse, StubTransport, TransportError};
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    fn fetcher(stub: StubTransport) -> (ContentFetcher, Arc<StubTransport>) {
        let stub = Arc::new(stub);
        (ContentFetcher::new(stub.clone()), stub)
    }

    #[tokio::test]
    async fn test_fetch_gzip_log_decompresses() {
        let (fetcher, stub) =
            fetcher(StubTransport::new().respond(HttpResponse::binary(200, gzip("hello"))));

        let text = fetcher
            .fetch("https://example.com/2024-01-01-1.log.gz")
            .await
            .unwrap();
        assert_eq!(text, "hello");
        assert_eq!(stub.requests()[0].response_type, ResponseType::Binary);
    }

    #[tokio::test]
    async fn test_fetch_large_gzip_log() {
        let line = "[12:00:00] [Server thread/INFO]: Preparing spawn area: 42%\n";
        let log = line.repeat(100_000);
        let (fetcher, _) =
            fetcher(StubTransport::new().respond(HttpResponse::binary(200, gzip(&log))));

        let text = fetcher.fetch("https://example.com/latest.log.gz").await.unwrap();
        assert_eq!(text.len(), log.len());
        assert_eq!(text, log);
    }

    #[tokio::test]
    async fn test_fetch_gzip_with_query_string() {
        let (fetcher, _) =
            fetcher(StubTransport::new().respond(HttpResponse::binary(200, gzip("[INFO] done"))));

        let text = fetcher
            .fetch("https://cdn.example.com/latest.log.gz?sig=abc")
            .await
            .unwrap();
        assert_eq!(text, "[INFO] done");
    }

    #[tokio::test]
    async fn test_fetch_corrupt_gzip_is_decompression_error() {
        let (fetcher, _) = fetcher(
            StubTransport::new().respond(HttpResponse::binary(200, b"definitely not gzip".to_vec())),
        );

        let err = fetcher.fetch("https://example.com/a.log.gz").await.unwrap_err();
        assert!(matches!(err, UploadError::Decompression(_)));
        assert!(err.to_string().starts_with("Gzip decompression failed: "));
    }

    #[tokio::test]
    async fn test_fetch_gzip_non_200_is_fetch_error() {
        let (fetcher, _) = fetcher(StubTransport::new().respond(HttpResponse::binary(403, Vec::new())));

        let err = fetcher.fetch("https://example.com/a.log.gz").await.unwrap_err();
        assert_eq!(err, UploadError::Fetch { status: 403 });
    }

    #[tokio::test]
    async fn test_fetch_plain_text() {
        let (fetcher, stub) =
            fetcher(StubTransport::new().respond(HttpResponse::text(200, "line 1\nline 2")));

        let text = fetcher.fetch("https://example.com/latest.log").await.unwrap();
        assert_eq!(text, "line 1\nline 2");

        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, reqwest::Method::GET);
        assert_eq!(requests[0].response_type, ResponseType::Text);
    }

    #[tokio::test]
    async fn test_fetch_plain_non_200_is_fetch_error() {
        let (fetcher, _) = fetcher(StubTransport::new().respond(HttpResponse::text(404, "nope")));

        let err = fetcher.fetch("https://example.com/latest.log").await.unwrap_err();
        assert_eq!(err, UploadError::Fetch { status: 404 });
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[tokio::test]
    async fn test_fetch_transport_failure_is_network_error() {
        let (fetcher, stub) = fetcher(StubTransport::new().fail(TransportError::Timeout));

        let err = fetcher.fetch("https://example.com/latest.log").await.unwrap_err();
        assert!(matches!(err, UploadError::Network(_)));
        assert_eq!(stub.request_count(), 1);
    }

    #[test]
    fn test_gunzip_replaces_invalid_utf8() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"ok\xff").unwrap();
        let bytes = encoder.finish().unwrap();

        assert_eq!(gunzip(&bytes).unwrap(), "ok\u{fffd}");
    }
}
