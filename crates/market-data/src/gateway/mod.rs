//! Rate-limited fetch gateway.
//!
//! Every call to the upstream market data provider goes through
//! [`FetchGateway`], which:
//! - spaces calls process-wide through a shared [`RateLimiter`]
//! - retries rate-limited calls with exponential backoff plus jitter
//! - degrades every failure to a deterministic, clearly tagged fallback
//!
//! The gateway never returns the provider's error to the caller; the only
//! signal of failure is [`FetchResult::Degraded`].

mod config;
mod rate_limiter;

pub use config::{
    GatewayConfig, RetryPolicy, DEFAULT_BACKOFF_BASE, DEFAULT_MAX_JITTER, DEFAULT_MAX_RETRIES,
};
pub use rate_limiter::{RateLimiter, DEFAULT_MIN_DELAY};

use std::future::Future;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::time::Instant;

use crate::errors::{MarketDataError, RetryClass};
use crate::models::{
    DegradedReason, FallbackPrices, FallbackQuote, FetchResult, PriceSeries, Symbol,
};
use crate::provider::MarketDataProvider;

/// Mediates provider calls with spacing, retry and fallback.
///
/// Create one per process and share it (e.g. in an `Arc`); the spacing
/// guarantee only holds across calls that go through the same instance.
#[derive(Debug)]
pub struct FetchGateway {
    limiter: RateLimiter,
    retry: RetryPolicy,
    fallback_prices: FallbackPrices,
}

impl FetchGateway {
    /// Create a gateway with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            limiter: RateLimiter::new(config.min_delay),
            retry: config.retry,
            fallback_prices: config.fallback_prices,
        }
    }

    /// Fetch through `call`, a zero-argument closure that performs one
    /// provider request.
    ///
    /// Each attempt first waits for the shared spacing slot. Rate-limited
    /// attempts are retried until `max_retries` attempts have been made in
    /// total, sleeping `base_delay * 2^attempt + jitter` between them.
    /// Not-found errors return immediately without retry; any other error is
    /// logged and degrades with the generic reason.
    pub async fn fetch<F, Fut>(&self, symbol: &Symbol, mut call: F) -> FetchResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PriceSeries, MarketDataError>>,
    {
        let max_attempts = self.retry.max_attempts();

        for attempt in 0..max_attempts {
            self.limiter.acquire().await;

            let error = match call().await {
                Ok(series) => {
                    debug!(
                        "Fetched {} observations for '{}' on attempt {}",
                        series.len(),
                        symbol,
                        attempt + 1
                    );
                    return FetchResult::Live(series);
                }
                Err(e) => e,
            };

            match error.retry_class() {
                RetryClass::WithBackoff => {
                    if attempt + 1 < max_attempts {
                        let wait = self.retry.backoff(attempt);
                        warn!(
                            "Rate limited fetching '{}' (attempt {}/{}), retrying in {:?}",
                            symbol,
                            attempt + 1,
                            max_attempts,
                            wait
                        );
                        tokio::time::sleep(wait).await;
                    } else {
                        warn!(
                            "Rate limited fetching '{}', giving up after {} attempts",
                            symbol, max_attempts
                        );
                    }
                }
                RetryClass::NoData => {
                    info!("No data for '{}': {}, not retrying", symbol, error);
                    return self.degrade(symbol, DegradedReason::NoData);
                }
                RetryClass::Never => {
                    warn!("Fetch failed for '{}': {}", symbol, error);
                    return self.degrade(symbol, DegradedReason::ProviderUnavailable);
                }
            }
        }

        self.degrade(symbol, DegradedReason::RateLimited)
    }

    /// Like [`fetch`](Self::fetch), bounded by `deadline`.
    ///
    /// When the deadline passes, the in-flight attempt and any pending sleep
    /// are dropped and a `DeadlineExceeded` fallback is returned.
    pub async fn fetch_with_deadline<F, Fut>(
        &self,
        symbol: &Symbol,
        deadline: Instant,
        call: F,
    ) -> FetchResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<PriceSeries, MarketDataError>>,
    {
        match tokio::time::timeout_at(deadline, self.fetch(symbol, call)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Deadline exceeded fetching '{}'", symbol);
                self.degrade(symbol, DegradedReason::DeadlineExceeded)
            }
        }
    }

    /// Fetch daily history for `symbol` from `provider`.
    pub async fn fetch_history(
        &self,
        provider: &dyn MarketDataProvider,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FetchResult {
        debug!(
            "Fetching '{}' from provider '{}' ({} to {})",
            symbol,
            provider.id(),
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );
        self.fetch(symbol, || provider.fetch_history(symbol, start, end))
            .await
    }

    /// The shared spacing state.
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// The retry policy for rate-limited calls.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The deterministic fallback for `symbol`, as returned on degradation.
    pub fn fallback_quote(&self, symbol: &Symbol, reason: DegradedReason) -> FallbackQuote {
        self.fallback_prices.quote(symbol, reason)
    }

    fn degrade(&self, symbol: &Symbol, reason: DegradedReason) -> FetchResult {
        FetchResult::Degraded(self.fallback_quote(symbol, reason))
    }
}

impl Default for FetchGateway {
    fn default() -> Self {
        Self::new(GatewayConfig::default())
    }
}
