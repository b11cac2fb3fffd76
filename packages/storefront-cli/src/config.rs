use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use storefront_api::{SecretString, SiteId};

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_token: SecretString,
    pub database_url: String,
    pub http_timeout: Duration,
    pub site_id: Option<SiteId>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            api_url: var("STOREFRONT_API_URL").context("STOREFRONT_API_URL must be set")?,
            api_token: var("STOREFRONT_API_TOKEN")
                .context("STOREFRONT_API_TOKEN must be set")?
                .into(),
            database_url: var("STOREFRONT_DATABASE_URL")
                .unwrap_or_else(|| "sqlite://storefront.db".to_string()),
            http_timeout: Duration::from_secs(
                var("STOREFRONT_HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("STOREFRONT_HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            site_id: var("STOREFRONT_SITE_ID")
                .map(|id| id.parse::<SiteId>())
                .transpose()
                .context("STOREFRONT_SITE_ID must be a number")?,
        })
    }
}
