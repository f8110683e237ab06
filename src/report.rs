//! User-facing notifications
//!
//! The orchestrator hands one [`Report`] per run to a [`ReportSink`]; how it
//! is shown (toast, terminal line, ...) is the sink's business.

use serde::Serialize;
use std::sync::Mutex;

const UPLOADING_TITLE: &str = "⏳ Uploading to mclo.gs";
const SUCCESS_TITLE: &str = "✅ Upload Successful!";
const FAILURE_TITLE: &str = "❌ Upload Failed";
const NO_SOURCE_TITLE: &str = "ℹ️ No Log Link Found";
const BUSY_TITLE: &str = "ℹ️ Upload In Progress";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub message: String,
    pub is_error: bool,
    pub link: Option<String>,
}

impl Report {
    fn info(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            is_error: false,
            link: None,
        }
    }

    pub fn uploading() -> Self {
        Self::info(UPLOADING_TITLE, "Downloading and uploading log file...")
    }

    pub fn success(url: &str, copied: bool) -> Self {
        let message = if copied {
            "Log uploaded to mclo.gs! URL copied to clipboard: "
        } else {
            "Log uploaded to mclo.gs! Copy the URL manually: "
        };
        Self {
            link: Some(url.to_string()),
            ..Self::info(SUCCESS_TITLE, message)
        }
    }

    pub fn failure(detail: &str) -> Self {
        Self {
            is_error: true,
            ..Self::info(FAILURE_TITLE, &format!("Failed to upload log: {detail}"))
        }
    }

    pub fn no_source() -> Self {
        Self::info(
            NO_SOURCE_TITLE,
            "Make sure you've captured a log link or selected some text!",
        )
    }

    pub fn busy() -> Self {
        Self::info(BUSY_TITLE, "Upload already in progress")
    }
}

/// Receives notifications from the orchestrator
pub trait ReportSink: Send + Sync {
    /// Final result of a run, called exactly once per run
    fn report(&self, report: &Report);

    /// Progress notice before any network activity
    fn started(&self, _report: &Report) {}
}

/// Prints reports to the terminal; errors go to stderr
#[derive(Debug, Default)]
pub struct ConsoleSink {
    pub show_progress: bool,
}

impl ReportSink for ConsoleSink {
    fn report(&self, report: &Report) {
        let link = report.link.as_deref().unwrap_or_default();
        if report.is_error {
            eprintln!("{}\n{}{}", report.title, report.message, link);
        } else {
            println!("{}\n{}{}", report.title, report.message, link);
        }
    }

    fn started(&self, report: &Report) {
        if self.show_progress {
            eprintln!("{}\n{}", report.title, report.message);
        }
    }
}

/// Keeps every report in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<Report>>,
    started: Mutex<Vec<Report>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn started_count(&self) -> usize {
        self.started.lock().unwrap_or_else(|p| p.into_inner()).len()
    }
}

impl ReportSink for RecordingSink {
    fn report(&self, report: &Report) {
        self.reports
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(report.clone());
    }

    fn started(&self, report: &Report) {
        self.started
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_wording_depends_on_copy() {
        let copied = Report::success("https://mclo.gs/abc", true);
        assert!(copied.message.contains("copied to clipboard"));
        assert_eq!(copied.link.as_deref(), Some("https://mclo.gs/abc"));
        assert!(!copied.is_error);

        let manual = Report::success("https://mclo.gs/abc", false);
        assert!(manual.message.contains("manually"));
        assert_eq!(copied.title, manual.title);
    }

    #[test]
    fn test_busy_is_informational() {
        let report = Report::busy();
        assert_eq!(report.message, "Upload already in progress");
        assert!(!report.is_error);
        assert_eq!(report.link, None);
    }

    #[test]
    fn test_failure_carries_detail() {
        let report = Report::failure("HTTP error! status: 404");
        assert!(report.is_error);
        assert_eq!(report.message, "Failed to upload log: HTTP error! status: 404");
        assert!(report.link.is_none());
    }
}
