//! JSON 1.1 transport for the pipeline API
//!
//! Every operation is a POST of a JSON body to the service endpoint, with
//! the operation named in `X-Amz-Target`. Failed replies carry a
//! `{"__type": ..., "message": ...}` body which is decoded into
//! [`Error::Service`] so the retry loop can tell throttling from caller
//! mistakes.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::error::{Error, Result};
use crate::types::BackoffType;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Content type of the provider's JSON protocol
pub const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Header naming the operation a request targets
pub const AMZ_TARGET_HEADER: &str = "X-Amz-Target";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Service endpoint every operation is posted to
    pub endpoint: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Client-side throttle, off unless configured
    pub rate_limit: Option<RateLimiterConfig>,
    /// Extra headers for every request (e.g. a session token)
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(20),
            backoff_type: BackoffType::Exponential,
            rate_limit: None,
            default_headers: HashMap::new(),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the service endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Throttle requests client-side
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Error body of the JSON protocol
#[derive(Deserialize)]
struct ServiceFault {
    #[serde(rename = "__type")]
    error_type: String,
    #[serde(default, alias = "Message")]
    message: String,
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    endpoint: Url,
    config: HttpClientConfig,
    rate_limiter: Option<RateLimiter>,
}

impl HttpClient {
    /// Create a client posting to `config.endpoint`
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::config("HTTP transport requires an endpoint"))?;
        let endpoint = Url::parse(endpoint)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("pipeline-query/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let rate_limiter = config.rate_limit.map(RateLimiter::new);

        Ok(Self {
            client,
            endpoint,
            config,
            rate_limiter,
        })
    }

    /// POST `body` to the operation `target` and decode the JSON reply
    ///
    /// Retryable failures (see [`Error::is_retryable`]) are attempted again
    /// up to `max_retries` times; anything else is returned at once.
    pub async fn send<Req, Resp>(&self, target: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        let max_retries = self.config.max_retries;
        let mut attempt = 0;

        loop {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait().await;
            }

            match self.post(target, &payload).await {
                Ok(reply) => {
                    debug!(operation = target, attempt, bytes = reply.len(), "Request succeeded");
                    return Ok(serde_json::from_slice(&reply)?);
                }
                Err(err) if attempt < max_retries && err.is_retryable() => {
                    let delay = self.calculate_backoff(attempt);
                    warn!(
                        operation = target,
                        attempt = attempt + 1,
                        attempts = max_retries + 1,
                        error = %err,
                        "Request failed, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: returns the raw reply body of a successful response
    async fn post(&self, target: &str, payload: &[u8]) -> Result<Vec<u8>> {
        let mut request = self.client.post(self.endpoint.clone());
        for (key, value) in &self.config.default_headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request
            .header(AMZ_TARGET_HEADER, target)
            .header(CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .body(payload.to_vec())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fault_error(status.as_u16(), body));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            Error::Http(err)
        }
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self.config.initial_backoff * (attempt + 1),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff * factor
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Decode a failed reply, keeping the raw body when it is not a provider fault
fn fault_error(status: u16, body: String) -> Error {
    match serde_json::from_str::<ServiceFault>(&body) {
        // `__type` may be namespaced: "com.amazonaws.datapipeline#PipelineNotFoundException"
        Ok(fault) => {
            let code = fault.error_type.rsplit('#').next().unwrap_or_default();
            Error::service(status, code, fault.message)
        }
        Err(_) => Error::http_status(status, body),
    }
}
