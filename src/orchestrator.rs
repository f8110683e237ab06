//! One upload run: resolve the source, fetch, upload, copy, report
//!
//! ```text
//! Idle -> Fetching -> Uploading -> Copying -> Reported(success)
//!    \___________________\________________-> Reported(failure)
//! ```
//!
//! Text sources skip `Fetching`. Whatever goes wrong, the sink receives
//! exactly one report per run.

use bon::Builder;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use crate::classify::is_http_url;
use crate::clipboard::ClipboardWriter;
use crate::error::{UploadError, UploadOutcome};
use crate::fetch::SourceFetcher;
use crate::links::LinkStore;
use crate::observability::Metrics;
use crate::report::{Report, ReportSink};
use crate::upload::{LogUploader, UploadedLog};

/// What the user asked to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// A captured link. Values without an http(s) scheme are uploaded as-is.
    Url(String),
    /// Selected raw text
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Fetching,
    Uploading,
    Copying,
    Reported {
        success: bool,
    },
}

#[derive(Builder)]
pub struct UploadOrchestrator {
    fetcher: Arc<dyn SourceFetcher>,
    uploader: Arc<dyn LogUploader>,
    links: Arc<dyn LinkStore>,
    sink: Arc<dyn ReportSink>,
    #[builder(default)]
    clipboard: ClipboardWriter,
    #[builder(default)]
    metrics: Arc<Metrics>,
    #[builder(skip)]
    stage: Mutex<Stage>,
    #[builder(skip)]
    in_flight: AtomicBool,
}

/// Releases the in-flight flag when the run ends
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl UploadOrchestrator {
    /// The user's upload action.
    ///
    /// Picks the captured link if there is one, otherwise the non-empty text
    /// selection. Returns `None` without uploading when there is nothing to
    /// upload or another run is still in flight; both cases are reported.
    pub async fn trigger(&self, selection: Option<&str>) -> Option<UploadOutcome> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            info!("Upload requested while another is in flight");
            self.sink.report(&Report::busy());
            return None;
        };

        let Some(source) = self.resolve_source(selection) else {
            info!("Upload requested without a captured link or selection");
            self.sink.report(&Report::no_source());
            return None;
        };

        Some(self.run(source).await)
    }

    fn resolve_source(&self, selection: Option<&str>) -> Option<UploadSource> {
        if let Some(link) = self.links.get().filter(|link| !link.is_empty()) {
            return Some(UploadSource::Url(link));
        }
        selection
            .filter(|text| !text.trim().is_empty())
            .map(|text| UploadSource::Text(text.to_string()))
    }

    /// Drive one source through the pipeline and report the result
    pub async fn run(&self, source: UploadSource) -> UploadOutcome {
        self.metrics.upload_started();
        self.sink.started(&Report::uploading());

        let from_link = matches!(source, UploadSource::Url(_));

        match self.acquire_and_upload(source).await {
            Ok(UploadedLog { url, id }) => {
                self.enter(Stage::Copying);
                let copied = self.clipboard.copy(&url).await;
                if !copied && self.clipboard.is_enabled() {
                    self.metrics.clipboard_failed();
                }

                self.enter(Stage::Reported { success: true });
                if from_link {
                    self.links.clear();
                }
                self.metrics.upload_succeeded();
                self.sink.report(&Report::success(&url, copied));

                UploadOutcome::Success { url, id }
            }
            Err(e) => {
                error!(kind = %e.kind(), error = %e, "Error uploading to mclo.gs");

                self.enter(Stage::Reported { success: false });
                self.metrics.upload_failed();
                let outcome = UploadOutcome::from(e);
                if let UploadOutcome::Failure { detail, .. } = &outcome {
                    self.sink.report(&Report::failure(detail));
                }
                outcome
            }
        }
    }

    async fn acquire_and_upload(&self, source: UploadSource) -> Result<UploadedLog, UploadError> {
        let content = match source {
            UploadSource::Url(value) => {
                self.enter(Stage::Fetching);
                if is_http_url(&value) {
                    self.fetcher.fetch(value.trim()).await?
                } else {
                    value
                }
            }
            UploadSource::Text(text) => text,
        };

        self.enter(Stage::Uploading);
        self.uploader.upload(&content).await
    }

    fn enter(&self, stage: Stage) {
        debug!(?stage, "Upload stage");
        *self.stage.lock().unwrap_or_else(|p| p.into_inner()) = stage;
    }

    pub fn stage(&self) -> Stage {
        *self.stage.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
