//! Wiring of the pipeline from configuration

use std::sync::Arc;

use crate::clipboard::{ClipboardBackend, ClipboardWriter, CommandClipboard, NativeClipboard};
use crate::config::Config;
use crate::fetch::ContentFetcher;
use crate::links::{InMemoryLinkStore, LinkCapture, LinkStore};
use crate::observability::Metrics;
use crate::orchestrator::UploadOrchestrator;
use crate::report::ReportSink;
use crate::transport::{HttpConfig, HttpTransport, ReqwestTransport, TransportError};
use crate::upload::UploadClient;

/// A ready-to-trigger uploader plus the link observer feeding it
pub struct App {
    pub orchestrator: UploadOrchestrator,
    pub capture: LinkCapture,
    pub links: Arc<dyn LinkStore>,
    pub metrics: Arc<Metrics>,
}

impl App {
    pub fn from_config(config: &Config, sink: Arc<dyn ReportSink>) -> Result<Self, TransportError> {
        let transport = Arc::new(ReqwestTransport::new(&HttpConfig::from(&config.http))?);
        Ok(Self::with_transport(config, transport, sink))
    }

    /// Same wiring over any transport
    pub fn with_transport(
        config: &Config,
        transport: Arc<dyn HttpTransport>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        let links: Arc<dyn LinkStore> = Arc::new(InMemoryLinkStore::new());
        let metrics = Arc::new(Metrics::new());

        let uploader = UploadClient::new(transport.clone(), &config.api.base_url)
            .with_size_warning(config.upload.warn_content_bytes);

        let orchestrator = UploadOrchestrator::builder()
            .fetcher(Arc::new(ContentFetcher::new(transport)))
            .uploader(Arc::new(uploader))
            .links(links.clone())
            .sink(sink)
            .clipboard(clipboard_from_config(config))
            .metrics(metrics.clone())
            .build();

        Self {
            orchestrator,
            capture: LinkCapture::new(links.clone()),
            links,
            metrics,
        }
    }
}

fn clipboard_from_config(config: &Config) -> ClipboardWriter {
    if !config.clipboard.enabled {
        return ClipboardWriter::disabled();
    }

    let fallback = CommandClipboard::from_argv(&config.clipboard.fallback_command)
        .map(|command| Arc::new(command) as Arc<dyn ClipboardBackend>);
    ClipboardWriter::new(Arc::new(NativeClipboard), fallback)
}
