use std::env;

use crate::error::CardGenError;
use crate::utils::trim_line;

pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeySource {
    Flag,
    Environment,
}

impl ApiKeySource {
    pub fn description(&self) -> &'static str {
        match self {
            ApiKeySource::Flag => "--api-key flag",
            ApiKeySource::Environment => "environment variable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub key: String,
    pub source: ApiKeySource,
}

/// Resolves the API key once at startup: the flag wins, then `DEEPSEEK_API_KEY`.
pub fn resolve_api_key(flag: Option<&str>) -> Result<ApiKey, CardGenError> {
    resolve_api_key_from(flag, env::var(API_KEY_ENV).ok().as_deref())
}

pub fn resolve_api_key_from(
    flag: Option<&str>,
    environment: Option<&str>,
) -> Result<ApiKey, CardGenError> {
    if let Some(key) = flag.and_then(trim_line) {
        return Ok(ApiKey {
            key: key.to_string(),
            source: ApiKeySource::Flag,
        });
    }

    if let Some(key) = environment.and_then(trim_line) {
        return Ok(ApiKey {
            key: key.to_string(),
            source: ApiKeySource::Environment,
        });
    }

    Err(CardGenError::Configuration(format!(
        "API key is required. Provide it via --api-key or set the {API_KEY_ENV} environment variable."
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_takes_precedence_over_environment() {
        let key = resolve_api_key_from(Some("sk-flag"), Some("sk-env")).unwrap();
        assert_eq!(key.key, "sk-flag");
        assert_eq!(key.source, ApiKeySource::Flag);
    }

    #[test]
    fn blank_flag_falls_back_to_environment() {
        let key = resolve_api_key_from(Some("   "), Some(" sk-env \n")).unwrap();
        assert_eq!(key.key, "sk-env");
        assert_eq!(key.source, ApiKeySource::Environment);
        assert_eq!(key.source.description(), "environment variable");
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = resolve_api_key_from(None, None).unwrap_err();
        assert!(matches!(err, CardGenError::Configuration(_)));
        assert!(err.to_string().contains(API_KEY_ENV));

        let err = resolve_api_key_from(Some(""), Some("  ")).unwrap_err();
        assert!(matches!(err, CardGenError::Configuration(_)));
    }
}
