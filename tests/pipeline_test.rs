//! Full wiring from `App` down to a canned transport

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use std::sync::Arc;

use mclogs_uploader::app::App;
use mclogs_uploader::config::Config;
use mclogs_uploader::report::RecordingSink;
use mclogs_uploader::transport::{HttpResponse, ResponseType, StubTransport, TransportError};
use mclogs_uploader::{ErrorKind, UploadOutcome};

fn test_config() -> Config {
    let mut config = Config::default();
    config.clipboard.enabled = false;
    config
}

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

const SUCCESS_BODY: &str = r#"{"success":true,"id":"abc","url":"https://mclo.gs/abc","raw":"https://api.mclo.gs/1/raw/abc"}"#;

#[tokio::test]
async fn gzip_link_is_fetched_decompressed_and_uploaded() {
    let transport = Arc::new(
        StubTransport::new()
            .respond(HttpResponse::binary(200, gzip("[12:00:00] [Server thread/INFO]: Done")))
            .respond(HttpResponse::text(200, SUCCESS_BODY)),
    );
    let sink = Arc::new(RecordingSink::new());
    let app = App::with_transport(&test_config(), transport.clone(), sink.clone());

    assert!(app.capture.observe("https://example.com/logs/2024-05-01-1.log.gz"));
    let outcome = app.orchestrator.trigger(None).await.unwrap();

    assert_eq!(
        outcome,
        UploadOutcome::Success {
            url: "https://mclo.gs/abc".to_string(),
            id: "abc".to_string(),
        }
    );

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, "https://example.com/logs/2024-05-01-1.log.gz");
    assert_eq!(requests[0].response_type, ResponseType::Binary);
    assert_eq!(requests[1].url, "https://api.mclo.gs/1/log");
    let body = requests[1].body.as_deref().unwrap();
    assert!(body.starts_with("content="));
    assert!(body.contains("Server+thread%2FINFO"));

    assert_eq!(app.links.get(), None);
    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].message.contains("manually"));
}

#[tokio::test]
async fn fetch_error_never_reaches_the_api() {
    let transport = Arc::new(StubTransport::new().respond(HttpResponse::text(500, "boom")));
    let sink = Arc::new(RecordingSink::new());
    let app = App::with_transport(&test_config(), transport.clone(), sink.clone());

    app.capture.observe("https://example.com/latest.log");
    let outcome = app.orchestrator.trigger(None).await.unwrap();

    assert_eq!(
        outcome,
        UploadOutcome::Failure {
            reason: ErrorKind::Fetch,
            detail: "HTTP error! status: 500".to_string(),
        }
    );
    assert_eq!(transport.request_count(), 1);
    assert_eq!(transport.requests()[0].method, reqwest::Method::GET);

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].message.ends_with("HTTP error! status: 500"));
}

#[tokio::test]
async fn text_selection_goes_straight_to_the_api() {
    let transport = Arc::new(StubTransport::new().respond(HttpResponse::text(200, SUCCESS_BODY)));
    let sink = Arc::new(RecordingSink::new());
    let app = App::with_transport(&test_config(), transport.clone(), sink.clone());

    let outcome = app.orchestrator.trigger(Some("panic: x")).await.unwrap();

    assert!(outcome.is_success());
    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body.as_deref(), Some("content=panic%3A+x"));
    assert_eq!(app.metrics.snapshot().uploads_succeeded, 1);
    // clipboard is off in these tests, which is not a copy failure
    assert_eq!(app.metrics.snapshot().clipboard_failures, 0);
}

#[tokio::test]
async fn network_failure_during_upload_is_reported() {
    let transport = Arc::new(
        StubTransport::new().fail(TransportError::RequestFailed("connection refused".into())),
    );
    let sink = Arc::new(RecordingSink::new());
    let app = App::with_transport(&test_config(), transport, sink.clone());

    let outcome = app.orchestrator.trigger(Some("some log")).await.unwrap();

    assert!(matches!(
        outcome,
        UploadOutcome::Failure {
            reason: ErrorKind::Network,
            ..
        }
    ));
    assert_eq!(sink.reports().len(), 1);
    assert!(sink.reports()[0].is_error);
}

#[tokio::test]
async fn custom_base_url_is_used() {
    let mut config = test_config();
    config.api.base_url = "http://localhost:9000/".to_string();
    let transport = Arc::new(StubTransport::new().respond(HttpResponse::text(200, SUCCESS_BODY)));
    let app = App::with_transport(&config, transport.clone(), Arc::new(RecordingSink::new()));

    app.orchestrator.trigger(Some("x")).await.unwrap();
    assert_eq!(transport.requests()[0].url, "http://localhost:9000/1/log");
}
