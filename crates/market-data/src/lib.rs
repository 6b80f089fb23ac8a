//! Borsvakt Market Data Crate
//!
//! Rate-limited, fault-tolerant fetching of daily price history.
//!
//! # Overview
//!
//! - [`Symbol`] - Validated instrument identifier (e.g. "EQNR.OL")
//! - [`PriceSeries`] - Ordered OHLCV observations for one symbol
//! - [`FetchGateway`] - Spaces, retries and degrades every provider call
//! - [`FetchResult`] - Either live data or a tagged [`FallbackQuote`]
//! - [`MarketDataProvider`] - Upstream source abstraction ([`YahooProvider`])
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Caller       | --> |   FetchGateway   |  (spacing, retry, fallback)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Provider      |  (Yahoo)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   FetchResult    |  (Live | Degraded)
//!                          +------------------+
//! ```

pub mod errors;
pub mod gateway;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use gateway::{FetchGateway, GatewayConfig, RateLimiter, RetryPolicy};
pub use models::{
    Bar, DegradedReason, FallbackPrices, FallbackQuote, FetchResult, PriceSeries, QuoteSummary,
    Symbol, DEFAULT_FALLBACK_PRICE,
};
pub use provider::{MarketDataProvider, YahooProvider};
