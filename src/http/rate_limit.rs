//! Client-side request throttling
//!
//! One token bucket per transport, consulted before every attempt
//! (retries included), so a long cursor walk stays under the provider's
//! per-account request quota instead of tripping `ThrottlingException`.

use governor::{DefaultDirectRateLimiter, Quota};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Token bucket settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Requests allowed back to back before throttling starts
    pub burst_size: u32,
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// A zero rate is raised to one; a zero burst falls back to the rate
    fn quota(self) -> Quota {
        let rate = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(rate);
        Quota::per_second(rate).allow_burst(burst)
    }
}

/// Throttle shared by every request of one [`HttpClient`](super::HttpClient)
pub struct RateLimiter {
    bucket: DefaultDirectRateLimiter,
    config: RateLimiterConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            bucket: governor::RateLimiter::direct(config.quota()),
            config,
        }
    }

    /// Wait until a request can be made
    pub async fn wait(&self) {
        self.bucket.until_ready().await;
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
