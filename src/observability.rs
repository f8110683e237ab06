//! Tracing setup and in-process upload counters

use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. `RUST_LOG` wins over `default_filter`.
/// Calling it twice is harmless.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Counters for the lifetime of the process
#[derive(Debug, Default)]
pub struct Metrics {
    uploads_started: AtomicU64,
    uploads_succeeded: AtomicU64,
    uploads_failed: AtomicU64,
    clipboard_failures: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload_started(&self) {
        self.uploads_started.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "uploads_started", "Metric incremented");
    }

    pub fn upload_succeeded(&self) {
        self.uploads_succeeded.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "uploads_succeeded", "Metric incremented");
    }

    pub fn upload_failed(&self) {
        self.uploads_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "uploads_failed", "Metric incremented");
    }

    pub fn clipboard_failed(&self) {
        self.clipboard_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "clipboard_failures", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            uploads_started: self.uploads_started.load(Ordering::Relaxed),
            uploads_succeeded: self.uploads_succeeded.load(Ordering::Relaxed),
            uploads_failed: self.uploads_failed.load(Ordering::Relaxed),
            clipboard_failures: self.clipboard_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub uploads_started: u64,
    pub uploads_succeeded: u64,
    pub uploads_failed: u64,
    pub clipboard_failures: u64,
}
