//! Best-effort copy of the share URL

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// One way of putting text on the system clipboard
#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard through `arboard`
#[derive(Debug, Default)]
pub struct NativeClipboard;

#[async_trait]
impl ClipboardBackend for NativeClipboard {
    fn name(&self) -> &str {
        "native"
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?
    }
}

/// Pipes the text into an external program such as `wl-copy` or `pbcopy`
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from `["program", "arg", ...]`; `None` when the list is empty
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.to_vec()))
    }
}

#[async_trait]
impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &str {
        &self.program
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ClipboardError::Unavailable(format!("{}: {}", self.program, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                // kill() also waits on the child
                drop(stdin);
                let _ = child.kill().await;
                return Err(ClipboardError::WriteFailed(format!(
                    "{}: {}",
                    self.program, e
                )));
            }
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::WriteFailed(format!(
                "{} exited with {}",
                self.program, status
            )))
        }
    }
}

/// Tries each backend in order. Copy failure is never fatal to an upload.
#[derive(Clone, Default)]
pub struct ClipboardWriter {
    backends: Vec<Arc<dyn ClipboardBackend>>,
}

impl ClipboardWriter {
    pub fn new(
        primary: Arc<dyn ClipboardBackend>,
        fallback: Option<Arc<dyn ClipboardBackend>>,
    ) -> Self {
        let mut backends = vec![primary];
        backends.extend(fallback);
        Self { backends }
    }

    /// A writer that never copies; `copy` always reports false
    pub fn disabled() -> Self {
        Self::default()
    }

    /// False for a [`disabled`](Self::disabled) writer
    pub fn is_enabled(&self) -> bool {
        !self.backends.is_empty()
    }

    pub async fn copy(&self, text: &str) -> bool {
        if !self.is_enabled() {
            debug!("Clipboard disabled, skipping copy");
            return false;
        }

        for backend in &self.backends {
            match backend.write(text).await {
                Ok(()) => {
                    debug!(backend = backend.name(), "Copied to clipboard");
                    return true;
                }
                Err(e) => warn!(backend = backend.name(), error = %e, "Clipboard copy failed"),
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeBackend {
        fail: bool,
        written: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn written(&self) -> Vec<String> {
            self.written.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ClipboardBackend for FakeBackend {
        fn name(&self) -> &str {
            "fake"
        }

        async fn write(&self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Unavailable("no display".into()));
            }
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = Arc::new(FakeBackend::default());
        let fallback = Arc::new(FakeBackend::default());
        let writer = ClipboardWriter::new(primary.clone(), Some(fallback.clone()));

        assert!(writer.copy("https://mclo.gs/abc").await);
        assert_eq!(primary.written(), vec!["https://mclo.gs/abc"]);
        assert!(fallback.written().is_empty());
    }

    #[tokio::test]
    async fn test_falls_back_when_primary_fails() {
        let fallback = Arc::new(FakeBackend::default());
        let writer = ClipboardWriter::new(Arc::new(FakeBackend::failing()), Some(fallback.clone()));

        assert!(writer.copy("https://mclo.gs/abc").await);
        assert_eq!(fallback.written(), vec!["https://mclo.gs/abc"]);
    }

    #[tokio::test]
    async fn test_both_failing_returns_false() {
        let writer = ClipboardWriter::new(
            Arc::new(FakeBackend::failing()),
            Some(Arc::new(FakeBackend::failing())),
        );
        assert!(!writer.copy("https://mclo.gs/abc").await);
    }

    #[tokio::test]
    async fn test_disabled_never_copies() {
        let writer = ClipboardWriter::disabled();
        assert!(!writer.is_enabled());
        assert!(!writer.copy("x").await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_that_ignores_stdin_is_write_failure() {
        // `true` exits without reading, so a large write hits a closed pipe
        let backend = CommandClipboard::new("true", Vec::new());
        let text = "x".repeat(1024 * 1024);
        assert!(matches!(
            backend.write(&text).await,
            Err(ClipboardError::WriteFailed(_))
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_reading_stdin_succeeds() {
        let backend = CommandClipboard::new("cat", Vec::new());
        backend.write("https://mclo.gs/abc").await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_command_is_unavailable() {
        let backend = CommandClipboard::new("definitely-not-a-clipboard-tool-xyz", Vec::new());
        assert!(matches!(
            backend.write("x").await,
            Err(ClipboardError::Unavailable(_))
        ));
    }

    #[test]
    fn test_from_argv() {
        assert!(CommandClipboard::from_argv(&[]).is_none());
        let backend =
            CommandClipboard::from_argv(&["xclip".into(), "-selection".into(), "clipboard".into()])
                .unwrap();
        assert_eq!(backend.name(), "xclip");
        assert_eq!(backend.args, vec!["-selection", "clipboard"]);
    }
}
