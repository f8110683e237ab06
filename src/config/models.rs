use crate::humanize::ByteSize;
use crate::transport::HttpConfig;
use crate::upload::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub clipboard: ClipboardSettings,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Log hosting API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Outbound HTTP client settings, shared by fetch and upload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpSettings {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    pub proxy: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            proxy: None,
        }
    }
}

impl From<&HttpSettings> for HttpConfig {
    fn from(settings: &HttpSettings) -> Self {
        Self {
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            request_timeout: Duration::from_secs(settings.request_timeout_secs),
            user_agent: settings.user_agent.clone(),
            proxy: settings.proxy.clone(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    HttpConfig::default().user_agent
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    /// Content above this size is logged as a warning, never truncated
    #[serde(default = "default_warn_content_bytes")]
    pub warn_content_bytes: ByteSize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            warn_content_bytes: default_warn_content_bytes(),
        }
    }
}

fn default_warn_content_bytes() -> ByteSize {
    ByteSize(10 * 1024 * 1024) // 10 MB
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClipboardSettings {
    #[serde(default = "default_clipboard_enabled")]
    pub enabled: bool,
    /// Program (and arguments) fed the URL on stdin when the native
    /// clipboard is unavailable. Empty disables the fallback.
    #[serde(default = "default_fallback_command")]
    pub fallback_command: Vec<String>,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            enabled: default_clipboard_enabled(),
            fallback_command: default_fallback_command(),
        }
    }
}

fn default_clipboard_enabled() -> bool {
    true
}

fn default_fallback_command() -> Vec<String> {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(windows) {
        &["clip"]
    } else {
        &["wl-copy"]
    };
    argv.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "https://api.mclo.gs");
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert_eq!(config.upload.warn_content_bytes.as_u64(), 10 * 1024 * 1024);
        assert!(config.clipboard.enabled);
        assert_eq!(config.clipboard.fallback_command.len(), 1);
        assert_eq!(config.telemetry.log_filter, "info");
    }

    #[test]
    fn test_http_config_conversion() {
        let settings = HttpSettings {
            request_timeout_secs: 5,
            proxy: Some("http://proxy:3128".to_string()),
            ..HttpSettings::default()
        };
        let http = HttpConfig::from(&settings);
        assert_eq!(http.request_timeout, Duration::from_secs(5));
        assert_eq!(http.connect_timeout, Duration::from_secs(10));
        assert_eq!(http.proxy.as_deref(), Some("http://proxy:3128"));
    }
}
