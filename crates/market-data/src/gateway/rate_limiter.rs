//! Process-wide request spacing for the market data provider.
//!
//! The upstream provider throttles per client (IP / API key), not per symbol,
//! so a single limiter is shared by every fetch. A caller holds the lock for
//! the whole wait: it reads the last start, sleeps until the next free slot
//! and stamps the new start before releasing. Callers queue on the lock in
//! arrival order, and a caller dropped while waiting leaves the queue without
//! reserving anything.

use std::time::Duration;

use log::debug;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default spacing between provider calls.
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(1);

/// Minimum-spacing rate limiter shared across all symbols.
///
/// Construct one per process and share it by handle. Every acquired slot,
/// including those used by attempts that later fail, advances the
/// last-request time.
#[derive(Debug)]
pub struct RateLimiter {
    /// Minimum time between the starts of two provider calls.
    min_delay: Duration,
    /// Start time of the most recent call.
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum spacing.
    pub fn new(min_delay: Duration) -> Self {
        Self {
            min_delay,
            last_request: Mutex::new(None),
        }
    }

    /// Wait until a provider call may start.
    ///
    /// Returns once at least `min_delay` has elapsed since the previous
    /// call started. Dropping the future before it completes leaves the
    /// last-request time untouched.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let slot = previous + self.min_delay;
            let now = Instant::now();
            if slot > now {
                debug!("Rate limiter: waiting {:?} before next request", slot - now);
                tokio::time::sleep_until(slot).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Configured minimum spacing.
    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Start time of the most recent call, if any.
    pub async fn last_request(&self) -> Option<Instant> {
        *self.last_request.lock().await
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(1));

        let start = Instant::now();
        limiter.acquire().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(limiter.last_request().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_acquire_waits_min_delay() {
        let limiter = RateLimiter::new(Duration::from_secs(1));

        limiter.acquire().await;
        let first = limiter.last_request().await.unwrap();
        limiter.acquire().await;
        let second = limiter.last_request().await.unwrap();

        assert!(second - first >= Duration::from_secs(1));
        assert!(Instant::now() >= second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_idle_period() {
        let limiter = RateLimiter::new(Duration::from_millis(500));

        limiter.acquire().await;
        tokio::time::sleep(Duration::from_secs(2)).await;

        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_get_distinct_slots() {
        let limiter = Arc::new(RateLimiter::new(Duration::from_secs(1)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire().await;
                    Instant::now()
                })
            })
            .collect();

        let mut starts = Vec::new();
        for handle in handles {
            starts.push(handle.await.unwrap());
        }
        starts.sort();

        for pair in starts.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_waiter_does_not_hold_a_slot() {
        let limiter = RateLimiter::new(Duration::from_secs(1));
        limiter.acquire().await;
        let first = limiter.last_request().await.unwrap();

        let abandoned =
            tokio::time::timeout(Duration::from_millis(100), limiter.acquire()).await;
        assert!(abandoned.is_err());
        assert_eq!(limiter.last_request().await, Some(first));

        tokio::time::sleep(Duration::from_secs(2)).await;
        let start = Instant::now();
        limiter.acquire().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_default_min_delay() {
        let limiter = RateLimiter::default();
        assert_eq!(limiter.min_delay(), DEFAULT_MIN_DELAY);
        assert!(limiter.last_request().await.is_none());
    }
}
