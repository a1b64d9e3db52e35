//! Application configuration
//!
//! Settings are loaded from a YAML file; every field has a default so a
//! missing file section (or no file at all) still yields a usable config.
//!
//! ```yaml
//! api:
//!   base_url: https://api.punkapi.com/v2
//!   path: /beers
//!   page_size: 25
//! server:
//!   port: 8080
//! filter:
//!   min_abv: 15.0
//! ```

use crate::error::{Error, Result};
use crate::http::{BeerApiConfig, BeerApiConfigBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream API settings
    pub api: ApiSettings,
    /// HTTP server settings
    pub server: ServerSettings,
    /// Record filter settings
    pub filter: FilterSettings,
}

/// Upstream API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the upstream API
    pub base_url: String,
    /// Path of the paged listing endpoint
    pub path: String,
    /// Query parameter carrying the page index
    pub page_param: String,
    /// Query parameter carrying the page size (omit to not send one)
    pub page_size_param: Option<String>,
    /// Records per page
    pub page_size: Option<u32>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        let defaults = BeerApiConfig::default();
        Self {
            base_url: defaults.base_url,
            path: defaults.path,
            page_param: defaults.page_param,
            page_size_param: defaults.page_size_param,
            page_size: defaults.page_size,
            timeout_secs: defaults.timeout.as_secs(),
            user_agent: None,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Record filter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Minimum alcohol by volume a record must exceed to pass the filter
    pub min_abv: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self { min_abv: 15.0 }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .map_err(|e| Error::invalid_config("api.base_url", e.to_string()))?;

        if self.api.page_size == Some(0) {
            return Err(Error::invalid_config("api.page_size", "must be at least 1"));
        }

        if !self.filter.min_abv.is_finite() {
            return Err(Error::invalid_config("filter.min_abv", "must be finite"));
        }

        Ok(())
    }

    /// Build the fetch client configuration from these settings
    pub fn client_config(&self) -> BeerApiConfig {
        let mut builder = BeerApiConfigBuilder::default()
            .base_url(&self.api.base_url)
            .path(&self.api.path)
            .page_param(&self.api.page_param)
            .timeout(Duration::from_secs(self.api.timeout_secs));

        builder = match (&self.api.page_size_param, self.api.page_size) {
            (Some(param), Some(size)) => builder.page_size(param, size),
            _ => builder.no_page_size(),
        };

        if let Some(agent) = &self.api.user_agent {
            builder = builder.user_agent(agent);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.filter.min_abv, 15.0);
        assert_eq!(config.api.page_param, "page");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml("filter:\n  min_abv: 20.5\n").unwrap();
        assert_eq!(config.filter.min_abv, 20.5);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.api.path, "/beers");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = AppConfig::from_yaml("api:\n  base_url: not a url\n").unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = AppConfig::from_yaml("api:\n  page_size: 0\n").unwrap_err();
        assert!(err.to_string().contains("api.page_size"));
    }

    #[test]
    fn test_client_config_round_trip() {
        let config = AppConfig::from_yaml(
            "api:\n  base_url: https://example.com\n  path: /v2/beers\n  page_size_param: per_page\n  page_size: 10\n",
        )
        .unwrap();

        let client_config = config.client_config();
        assert_eq!(client_config.base_url, "https://example.com");
        assert_eq!(client_config.path, "/v2/beers");
        assert_eq!(client_config.page_size, Some(10));
    }
}
