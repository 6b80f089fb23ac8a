//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `symbol` - Validated instrument identifier (Symbol)
//! - `quote` - A single OHLCV observation (Bar) and its summary (QuoteSummary)
//! - `series` - Ordered observations for one symbol (PriceSeries)
//! - `fetch` - Gateway outcome (FetchResult) and fallback records

mod fetch;
mod quote;
mod series;
mod symbol;

pub use fetch::{
    DegradedReason, FallbackPrices, FallbackQuote, FetchResult, DEFAULT_FALLBACK_PRICE,
};
pub use quote::{Bar, QuoteSummary};
pub use series::PriceSeries;
pub use symbol::Symbol;
