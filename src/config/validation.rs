use super::models::Config;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("api.base_url '{value}' is not a valid URL: {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("api.base_url must use http or https, got '{scheme}'")]
    UnsupportedScheme { scheme: String },

    #[error("http.user_agent must not be empty")]
    EmptyUserAgent,

    #[error("Timeout must be positive: {field} = {value}")]
    InvalidTimeout { field: String, value: u64 },

    #[error("upload.warn_content_bytes must be positive")]
    InvalidWarnSize,

    #[error("clipboard.fallback_command has an empty program name")]
    EmptyFallbackProgram,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_api(config)?;
    validate_http(config)?;
    validate_upload(config)?;
    validate_clipboard(config)?;
    Ok(())
}

fn validate_api(config: &Config) -> Result<(), ValidationError> {
    let url = Url::parse(&config.api.base_url).map_err(|e| ValidationError::InvalidBaseUrl {
        value: config.api.base_url.clone(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ValidationError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}

fn validate_http(config: &Config) -> Result<(), ValidationError> {
    if config.http.user_agent.trim().is_empty() {
        return Err(ValidationError::EmptyUserAgent);
    }

    for (field, value) in [
        ("http.connect_timeout_secs", config.http.connect_timeout_secs),
        ("http.request_timeout_secs", config.http.request_timeout_secs),
    ] {
        if value == 0 {
            return Err(ValidationError::InvalidTimeout {
                field: field.to_string(),
                value,
            });
        }
    }

    Ok(())
}

fn validate_upload(config: &Config) -> Result<(), ValidationError> {
    if config.upload.warn_content_bytes.as_u64() == 0 {
        return Err(ValidationError::InvalidWarnSize);
    }
    Ok(())
}

fn validate_clipboard(config: &Config) -> Result<(), ValidationError> {
    match config.clipboard.fallback_command.first() {
        Some(program) if program.trim().is_empty() => Err(ValidationError::EmptyFallbackProgram),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humanize::ByteSize;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidBaseUrl { .. })
        ));

        config.api.base_url = "ftp://api.mclo.gs".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::UnsupportedScheme { scheme }) if scheme == "ftp"
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.request_timeout_secs = 0;
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("http.request_timeout_secs"));
    }

    #[test]
    fn test_rejects_empty_user_agent_and_warn_size() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(matches!(validate(&config), Err(ValidationError::EmptyUserAgent)));

        let mut config = Config::default();
        config.upload.warn_content_bytes = ByteSize(0);
        assert!(matches!(validate(&config), Err(ValidationError::InvalidWarnSize)));
    }

    #[test]
    fn test_empty_fallback_list_allowed_but_not_empty_program() {
        let mut config = Config::default();
        config.clipboard.fallback_command = Vec::new();
        assert!(validate(&config).is_ok());

        config.clipboard.fallback_command = vec![String::new()];
        assert!(matches!(
            validate(&config),
            Err(ValidationError::EmptyFallbackProgram)
        ));
    }
}
