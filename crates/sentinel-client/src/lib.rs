//! Sentinel Hub collaborator client.
//!
//! Covers the three provider interactions the fetch tool needs:
//! - OAuth2 client-credentials authentication
//! - STAC catalog item search
//! - Process API image download
//!
//! Configuration is passed by value at construction; the client holds no
//! global state and nothing is persisted between runs.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod evalscript;
pub mod process;

pub use catalog::{Scene, SearchQuery};
pub use config::ClientConfig;
pub use evalscript::{generate_evalscript, ImageType};
pub use process::{ImageRequest, OutputFormat};

use std::time::Duration;

use imagery_common::{FetchError, FetchResult};

/// Authenticated client for the Sentinel Hub catalog and process APIs.
pub struct SentinelClient {
    http: reqwest::Client,
    config: ClientConfig,
    token: String,
}

impl SentinelClient {
    /// Build an HTTP client and authenticate with the configured
    /// credentials. The bearer token is acquired once and held by value.
    pub async fn connect(config: ClientConfig) -> FetchResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| FetchError::Service(format!("failed to create HTTP client: {e}")))?;

        let token = auth::fetch_token(&http, &config).await?;

        Ok(Self {
            http,
            config,
            token,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
