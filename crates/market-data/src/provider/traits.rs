//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::MarketDataError;
use crate::models::{PriceSeries, Symbol};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// Providers translate their own failures into [`MarketDataError`] kinds at
/// the boundary; the fetch gateway decides what to retry from the kind alone.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use borsvakt_market_data::provider::MarketDataProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     async fn fetch_history(
///         &self,
///         symbol: &Symbol,
///         start: DateTime<Utc>,
///         end: DateTime<Utc>,
///     ) -> Result<PriceSeries, MarketDataError> {
///         Ok(PriceSeries::empty(symbol.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging.
    fn id(&self) -> &'static str;

    /// Fetch daily observations for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The instrument to fetch
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range (inclusive)
    ///
    /// # Returns
    ///
    /// A series ordered by timestamp ascending, or a `MarketDataError` on
    /// failure. An empty range should be reported as
    /// [`MarketDataError::NoDataForRange`] rather than an empty series.
    async fn fetch_history(
        &self,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries, MarketDataError>;
}
