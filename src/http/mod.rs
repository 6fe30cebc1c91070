//! HTTP transport module
//!
//! Provides the HTTP client the real backend talks through.
//!
//! # Features
//!
//! - **JSON 1.1 protocol**: POST bodies addressed by `X-Amz-Target`
//! - **Provider faults**: `__type`/`message` error bodies decoded into `Error::Service`
//! - **Automatic Retries**: Throttling and server faults retried with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor

mod client;
mod rate_limit;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, AMZ_JSON_CONTENT_TYPE,
    AMZ_TARGET_HEADER,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
