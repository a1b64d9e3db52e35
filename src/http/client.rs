//! Paged-endpoint HTTP client
//!
//! Issues one GET per page against a remote listing endpoint that accepts a
//! 1-based page query parameter and returns a JSON array of records. An
//! out-of-range page returns an empty array; that is the termination signal
//! the sequencer relies on.

use crate::error::{Error, Result};
use crate::pipeline::PageFetcher;
use crate::types::{Beer, Page, PageIndex};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Configuration for the paged-endpoint client
#[derive(Debug, Clone)]
pub struct BeerApiConfig {
    /// Base URL of the upstream API
    pub base_url: String,
    /// Path of the paged listing endpoint
    pub path: String,
    /// Query parameter carrying the 1-based page index
    pub page_param: String,
    /// Optional query parameter carrying the page size
    pub page_size_param: Option<String>,
    /// Page size value, sent only when the parameter is configured
    pub page_size: Option<u32>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for BeerApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.punkapi.com/v2".to_string(),
            path: "/beers".to_string(),
            page_param: "page".to_string(),
            page_size_param: Some("per_page".to_string()),
            page_size: Some(25),
            timeout: Duration::from_secs(30),
            user_agent: format!("brewstream/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl BeerApiConfig {
    /// Create a new config builder
    pub fn builder() -> BeerApiConfigBuilder {
        BeerApiConfigBuilder::default()
    }
}

/// Builder for the client config
#[derive(Default)]
pub struct BeerApiConfigBuilder {
    config: BeerApiConfig,
}

impl BeerApiConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the endpoint path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the page query parameter name
    pub fn page_param(mut self, param: impl Into<String>) -> Self {
        self.config.page_param = param.into();
        self
    }

    /// Set the page size parameter and value
    pub fn page_size(mut self, param: impl Into<String>, size: u32) -> Self {
        self.config.page_size_param = Some(param.into());
        self.config.page_size = Some(size);
        self
    }

    /// Do not send a page size parameter
    pub fn no_page_size(mut self) -> Self {
        self.config.page_size_param = None;
        self.config.page_size = None;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> BeerApiConfig {
        self.config
    }
}

/// HTTP client for a paged beer listing endpoint
pub struct BeerApiClient {
    client: Client,
    config: BeerApiConfig,
}

impl BeerApiClient {
    /// Create a client with default configuration
    pub fn new() -> Self {
        Self::with_config(BeerApiConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: BeerApiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &BeerApiConfig {
        &self.config
    }

    /// Full URL of the listing endpoint
    fn endpoint_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = self.config.path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl Default for BeerApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BeerApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeerApiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PageFetcher for BeerApiClient {
    type Item = Beer;

    async fn fetch_page(&self, page: PageIndex) -> Result<Page<Beer>> {
        let url = self.endpoint_url();

        let mut query: Vec<(&str, String)> =
            vec![(self.config.page_param.as_str(), page.to_string())];
        if let (Some(param), Some(size)) = (&self.config.page_size_param, self.config.page_size) {
            query.push((param.as_str(), size.to_string()));
        }

        debug!(%url, page, "requesting page");

        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = response.text().await?;
        let records: Page<Beer> = serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("expected a JSON array of records: {e}")))?;

        Ok(records)
    }
}
