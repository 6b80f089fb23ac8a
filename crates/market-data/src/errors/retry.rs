/// Classification for retry policy.
///
/// Used by the fetch gateway to decide what to do after a failed provider
/// call. Every class ends in a degraded result once retries stop; none of
/// them reaches the caller as an error.
///
/// # Behavior Summary
///
/// | Class | Retry? | Fallback reason when done |
/// |-------|--------|---------------------------|
/// | `WithBackoff` | Yes, up to the attempt budget | `RateLimited` |
/// | `NoData` | No | `NoData` |
/// | `Never` | No | `ProviderUnavailable` |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Transient throttling by the provider (HTTP 429).
    ///
    /// Retried with exponential backoff plus jitter. Each retry still goes
    /// through the shared request spacing.
    WithBackoff,

    /// The provider confirmed the resource does not exist.
    ///
    /// Retrying would only spend the shared rate budget.
    NoData,

    /// Any other failure. Logged and degraded immediately.
    Never,
}
