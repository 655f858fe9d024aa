//! Client configuration with typed builder.

use reqwest::Url;
use std::time::Duration;
use thiserror::Error;
use typed_builder::TypedBuilder;

pub const DEFAULT_USER_AGENT: &str = concat!("shorty-client/", env!("CARGO_PKG_VERSION"));

/// Configuration for a [`RemoteServiceClient`](crate::RemoteServiceClient).
///
/// # Example
///
/// ```rust
/// use shorty_client::ServiceConfig;
/// use std::time::Duration;
///
/// let config = ServiceConfig::builder()
///     .base_url("https://shorty.example")
///     .api_key("secret")
///     .timeout(Duration::from_secs(10))
///     .build();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, TypedBuilder)]
pub struct ServiceConfig {
    /// Base URL of the backend, e.g. `https://shorty.example`.
    #[builder(setter(into))]
    pub base_url: String,

    /// API key sent as a bearer token with every request.
    #[builder(setter(into))]
    pub api_key: String,

    /// Transport timeout applied to each request. `None` waits indefinitely.
    #[builder(default, setter(strip_option))]
    pub timeout: Option<Duration>,

    #[builder(default = DEFAULT_USER_AGENT.to_string(), setter(into))]
    pub user_agent: String,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ServiceConfig {
    /// Validates the configuration and returns the parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL or API key is blank
    /// - The base URL is not an absolute `http` or `https` URL
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidBaseUrl(format!("'{}': {e}", base_url)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "scheme must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "'{}' has no host",
                base_url
            )));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "'{}' must not carry a query or fragment",
                base_url
            )));
        }

        Ok(url)
    }
}

/// Configuration errors. Any of them prevents the client from being created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("backend base url is not configured")]
    MissingBaseUrl,
    #[error("backend api key is not configured")]
    MissingApiKey,
    #[error("invalid backend base url: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to initialize http client: {0}")]
    HttpClient(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str, api_key: &str) -> ServiceConfig {
        ServiceConfig::builder()
            .base_url(base_url)
            .api_key(api_key)
            .build()
    }

    #[test]
    fn test_default_config() {
        let config = config("https://shorty.example", "key");
        assert_eq!(config.timeout, None);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_validate_success() {
        let url = config("https://shorty.example/", "key").validate().unwrap();
        assert_eq!(url.as_str(), "https://shorty.example/");
    }

    #[test]
    fn test_validate_missing_base_url() {
        assert_eq!(
            config("", "key").validate().unwrap_err(),
            ConfigError::MissingBaseUrl
        );
        assert_eq!(
            config("   ", "key").validate().unwrap_err(),
            ConfigError::MissingBaseUrl
        );
    }

    #[test]
    fn test_validate_missing_api_key() {
        assert_eq!(
            config("https://shorty.example", "").validate().unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let err = config("ftp://shorty.example", "key").validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let err = config("shorty.example", "key").validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_validate_rejects_query() {
        let err = config("https://shorty.example/?a=b", "key")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", config("https://shorty.example", "top-secret"));
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
