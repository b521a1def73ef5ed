//! Client configuration.
//!
//! Credentials and endpoint settings are carried in a plain value handed to
//! the client constructor; nothing is written to a shared configuration
//! store.

use std::time::Duration;

use imagery_common::{FetchError, FetchResult};

/// Default Sentinel Hub API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://services.sentinel-hub.com";

/// Configuration for [`crate::SentinelClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// API endpoint root, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(120),
        }
    }

    /// Use a different API endpoint (e.g. a regional deployment).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Read credentials from the `client_id` / `client_secret` environment
    /// variables.
    pub fn from_env() -> FetchResult<Self> {
        let client_id = std::env::var("client_id")
            .map_err(|_| FetchError::Auth("client_id is not set".to_string()))?;
        let client_secret = std::env::var("client_secret")
            .map_err(|_| FetchError::Auth("client_secret is not set".to_string()))?;

        Ok(Self::new(client_id, client_secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("id", "secret");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::new("id", "secret")
            .with_base_url("https://sh.dataspace.copernicus.eu/");
        assert_eq!(config.base_url, "https://sh.dataspace.copernicus.eu");
    }
}
