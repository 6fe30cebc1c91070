//! Client configuration
//!
//! Settings are read from a YAML or JSON file (picked by extension), then
//! overridden from the environment, then validated.
//!
//! ```yaml
//! region: eu-west-1
//! timeout_secs: 30
//! max_retries: 3
//! backoff: exponential
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! page_limit: 100
//! max_pages: 500
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::PaginationConfig;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Environment variable overriding the region
pub const REGION_ENV: &str = "PIPELINE_QUERY_REGION";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "PIPELINE_QUERY_ENDPOINT";

/// Settings for a pipeline API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Provider region, used to derive the default endpoint
    #[serde(default = "default_region")]
    pub region: String,

    /// Explicit endpoint URL, overriding the regional default
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Transport-level retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial retry backoff in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Retry backoff ceiling in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Retry backoff growth
    #[serde(default)]
    pub backoff: BackoffType,

    /// Client-side throttle; both fields are required when set, `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Page size applied to queries that do not set one
    #[serde(default)]
    pub page_limit: Option<u32>,

    /// Upper bound on pages followed by one aggregated query
    #[serde(default)]
    pub max_pages: Option<u32>,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    20_000
}

/// Throttle used when the file does not mention `rate_limit`
fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::new(5, 5))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff: BackoffType::default(),
            rate_limit: default_rate_limit(),
            headers: HashMap::new(),
            page_limit: None,
            max_pages: None,
        }
    }
}

impl ClientConfig {
    /// Load from a file, apply environment overrides, and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_yaml(&content)?,
        };
        debug!(path = %path.display(), "Loaded client config");

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without environment overrides or validation
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse JSON without environment overrides or validation
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Override fields from `PIPELINE_QUERY_*` environment variables
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(region) = lookup(REGION_ENV).filter(|v| !v.is_empty()) {
            self.region = region;
        }
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.is_empty()) {
            self.endpoint = Some(endpoint);
        }
    }

    /// Check values that would otherwise fail late
    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(Error::invalid_config("region", "must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_config("timeout_secs", "must be positive"));
        }
        if self.page_limit == Some(0) {
            return Err(Error::invalid_config("page_limit", "must be positive"));
        }
        if self.max_pages == Some(0) {
            return Err(Error::invalid_config("max_pages", "must be positive"));
        }
        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_config(
                    "rate_limit.requests_per_second",
                    "must be positive",
                ));
            }
        }
        Url::parse(&self.endpoint_url())?;
        Ok(())
    }

    /// Endpoint requests are posted to
    pub fn endpoint_url(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://datapipeline.{}.amazonaws.com", self.region))
    }

    /// Transport settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .endpoint(self.endpoint_url())
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        builder = match &self.rate_limit {
            Some(rate_limit) => builder.rate_limit(*rate_limit),
            None => builder.no_rate_limit(),
        };

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        builder.build()
    }

    /// Pagination settings
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            max_pages: self.max_pages,
        }
    }
}
