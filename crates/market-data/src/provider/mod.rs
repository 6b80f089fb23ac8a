//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - The Yahoo Finance implementation used in production
//!
//! Providers are deliberately thin: they make one upstream request and map
//! the result into domain types and error kinds. Spacing, retry and fallback
//! live in the [`gateway`](crate::gateway).

mod traits;

pub mod yahoo;

pub use traits::MarketDataProvider;
pub use yahoo::YahooProvider;
