use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::series::PriceSeries;
use super::symbol::Symbol;

/// Price used for a fallback quote when no per-symbol price is configured.
pub const DEFAULT_FALLBACK_PRICE: Decimal = Decimal::ONE_HUNDRED;

/// Why a fetch degraded to a fallback quote.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    /// The provider kept rate limiting until the attempt budget ran out.
    RateLimited,
    /// The provider reported that the symbol or range has no data.
    NoData,
    /// Any other provider failure.
    ProviderUnavailable,
    /// The caller's deadline expired before the provider answered.
    DeadlineExceeded,
}

impl DegradedReason {
    /// Human-readable message suitable for a "data unavailable" banner.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::RateLimited => "API rate limited — showing fallback data.",
            Self::NoData => "no data found",
            Self::ProviderUnavailable => {
                "market data temporarily unavailable — showing fallback data."
            }
            Self::DeadlineExceeded => "market data request timed out — showing fallback data.",
        }
    }
}

impl fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Synthetic quote substituted when live data is unavailable.
///
/// All values are deterministic: the same symbol and reason always yield the
/// same record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackQuote {
    pub symbol: Symbol,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    pub volume: Decimal,
    pub reason: DegradedReason,
    pub message: String,
}

/// Outcome of a gateway fetch. Callers must branch on the tag before
/// treating the payload as market data.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum FetchResult {
    Live(PriceSeries),
    Degraded(FallbackQuote),
}

impl FetchResult {
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    pub fn series(&self) -> Option<&PriceSeries> {
        match self {
            Self::Live(series) => Some(series),
            Self::Degraded(_) => None,
        }
    }

    pub fn fallback(&self) -> Option<&FallbackQuote> {
        match self {
            Self::Live(_) => None,
            Self::Degraded(quote) => Some(quote),
        }
    }

    pub fn into_series(self) -> Option<PriceSeries> {
        match self {
            Self::Live(series) => Some(series),
            Self::Degraded(_) => None,
        }
    }
}

/// Deterministic per-symbol prices used for fallback quotes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FallbackPrices {
    prices: HashMap<Symbol, Decimal>,
}

impl FallbackPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, symbol: Symbol, price: Decimal) -> Self {
        self.prices.insert(symbol, price);
        self
    }

    pub fn price_for(&self, symbol: &Symbol) -> Decimal {
        self.prices
            .get(symbol)
            .copied()
            .unwrap_or(DEFAULT_FALLBACK_PRICE)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Build the fallback record for `symbol`.
    pub fn quote(&self, symbol: &Symbol, reason: DegradedReason) -> FallbackQuote {
        FallbackQuote {
            symbol: symbol.clone(),
            price: self.price_for(symbol),
            change: Decimal::ZERO,
            change_percent: Decimal::ZERO,
            volume: Decimal::ZERO,
            reason,
            message: reason.message().to_string(),
        }
    }
}

impl FromIterator<(Symbol, Decimal)> for FallbackPrices {
    fn from_iter<I: IntoIterator<Item = (Symbol, Decimal)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}
