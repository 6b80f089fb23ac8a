//! Gateway configuration: request spacing, retry budget and fallback prices.

use std::time::Duration;

use rand::Rng;

use super::rate_limiter::DEFAULT_MIN_DELAY;
use crate::models::FallbackPrices;

/// Default total number of attempts when the provider rate limits.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base of the exponential backoff.
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Default upper bound of the random jitter added to each backoff.
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_secs(1);

/// Largest exponent used for backoff; keeps the delay from overflowing.
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Retry policy for rate-limited provider calls.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero is treated as one.
    pub max_retries: u32,
    /// Delay after the first failed attempt; doubles for each later one.
    pub base_delay: Duration,
    /// Jitter is drawn uniformly from `[0, max_jitter)`.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BACKOFF_BASE,
            max_jitter: DEFAULT_MAX_JITTER,
        }
    }
}

impl RetryPolicy {
    /// Number of attempts the gateway will make.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// Backoff without jitter after the failed attempt `attempt` (0-indexed):
    /// `base_delay * 2^attempt`.
    pub fn base_backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(MAX_BACKOFF_EXPONENT);
        self.base_delay.saturating_mul(factor)
    }

    /// Backoff plus a random jitter in `[0, max_jitter)`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base = self.base_backoff(attempt);
        if self.max_jitter.is_zero() {
            return base;
        }

        let fraction: f64 = rand::thread_rng().gen_range(0.0..1.0);
        base.saturating_add(self.max_jitter.mul_f64(fraction))
    }
}

/// Configuration for a [`FetchGateway`](super::FetchGateway).
#[derive(Clone, Debug, PartialEq)]
pub struct GatewayConfig {
    /// Minimum spacing between any two provider calls.
    pub min_delay: Duration,
    /// Retry policy for rate-limited calls.
    pub retry: RetryPolicy,
    /// Deterministic prices for fallback quotes.
    pub fallback_prices: FallbackPrices,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            min_delay: DEFAULT_MIN_DELAY,
            retry: RetryPolicy::default(),
            fallback_prices: FallbackPrices::default(),
        }
    }
}

impl GatewayConfig {
    /// Set the minimum spacing between provider calls.
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    /// Set the total number of attempts for rate-limited calls.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    /// Set the backoff base and the jitter upper bound.
    pub fn with_backoff(mut self, base_delay: Duration, max_jitter: Duration) -> Self {
        self.retry.base_delay = base_delay;
        self.retry.max_jitter = max_jitter;
        self
    }

    /// Set the deterministic fallback price table.
    pub fn with_fallback_prices(mut self, fallback_prices: FallbackPrices) -> Self {
        self.fallback_prices = fallback_prices;
        self
    }
}
