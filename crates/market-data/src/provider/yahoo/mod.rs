//! Yahoo Finance market data provider.
//!
//! Fetches daily OHLCV history through the Yahoo Finance chart API, e.g.
//! Oslo Børs listings (EQNR.OL), US equities (AAPL) or FX pairs (EURNOK=X).

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{Bar, PriceSeries, Symbol};
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(dt.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

impl std::fmt::Debug for YahooProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooProvider").finish_non_exhaustive()
    }
}

/// Convert a Yahoo quote to a bar.
///
/// Close price and timestamp are required. Missing open/high/low fall back
/// to the close; volume is optional.
fn yahoo_quote_to_bar(yahoo_quote: &yahoo::Quote) -> Result<Bar, MarketDataError> {
    let timestamp: DateTime<Utc> = Utc
        .timestamp_opt(yahoo_quote.timestamp as i64, 0)
        .single()
        .ok_or_else(|| MarketDataError::ValidationFailed {
            message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
        })?;

    let close = Decimal::from_f64_retain(yahoo_quote.close).ok_or_else(|| {
        MarketDataError::ValidationFailed {
            message: format!(
                "Failed to convert close price {} to Decimal",
                yahoo_quote.close
            ),
        }
    })?;

    let or_close = |value: f64| Decimal::from_f64_retain(value).unwrap_or(close);

    Ok(Bar {
        timestamp,
        open: or_close(yahoo_quote.open),
        high: or_close(yahoo_quote.high),
        low: or_close(yahoo_quote.low),
        close,
        volume: Decimal::from_u64(yahoo_quote.volume),
    })
}

/// Map a Yahoo client error to a market data error kind.
///
/// The client library reports HTTP 429 only through its message text, so
/// this is the one place where a message is inspected.
fn map_yahoo_error(symbol: &Symbol, error: yahoo::YahooError) -> MarketDataError {
    if matches!(error, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
        return MarketDataError::SymbolNotFound(symbol.to_string());
    }
    classify_message(error.to_string())
}

fn classify_message(message: String) -> MarketDataError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("429") || lower.contains("too many requests") {
        MarketDataError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        }
    } else if lower.contains("timed out") || lower.contains("timeout") {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message,
        }
    }
}

/// Build a series from converted bars, dropping the ones that fail.
fn bars_to_series(
    symbol: &Symbol,
    quotes: &[yahoo::Quote],
) -> Result<PriceSeries, MarketDataError> {
    let bars: Vec<Bar> = quotes
        .iter()
        .filter_map(|q| match yahoo_quote_to_bar(q) {
            Ok(bar) => Some(bar),
            Err(e) => {
                warn!("Skipping quote for '{}' due to conversion error: {}", symbol, e);
                None
            }
        })
        .collect();

    if bars.is_empty() {
        return Err(MarketDataError::NoDataForRange);
    }

    Ok(PriceSeries::from_unordered(symbol.clone(), bars))
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_history(
        &self,
        symbol: &Symbol,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries, MarketDataError> {
        debug!(
            "Fetching historical quotes for {} from {} to {} from Yahoo",
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let start_time = Self::chrono_to_offset_datetime(start);
        let end_time = Self::chrono_to_offset_datetime(end);

        let response = self
            .connector
            .get_quote_history(symbol.as_str(), start_time, end_time)
            .await
            .map_err(|e| map_yahoo_error(symbol, e))?;

        match response.quotes() {
            Ok(yahoo_quotes) => bars_to_series(symbol, &yahoo_quotes),
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No historical quotes returned for '{}' between {} and {}",
                    symbol,
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                );
                Err(MarketDataError::NoDataForRange)
            }
            Err(e) => Err(map_yahoo_error(symbol, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RetryClass;

    fn quote(timestamp: i64, close: f64) -> yahoo::Quote {
        yahoo::Quote {
            timestamp: timestamp as _,
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            volume: 1_000,
            close,
            adjclose: close,
        }
    }

    fn eqnr() -> Symbol {
        Symbol::parse("EQNR.OL").unwrap()
    }

    #[test]
    fn test_quote_to_bar() {
        let bar = yahoo_quote_to_bar(&quote(1_709_251_200, 270.5)).unwrap();
        assert_eq!(bar.timestamp.timestamp(), 1_709_251_200);
        assert_eq!(bar.close_f64(), 270.5);
        assert_eq!(bar.high_f64(), 272.5);
        assert_eq!(bar.volume, Some(Decimal::from(1_000)));
    }

    #[test]
    fn test_non_finite_open_falls_back_to_close() {
        let mut q = quote(1_709_251_200, 270.5);
        q.open = f64::NAN;
        let bar = yahoo_quote_to_bar(&q).unwrap();
        assert_eq!(bar.open, bar.close);
    }

    #[test]
    fn test_non_finite_close_is_rejected() {
        let q = quote(1_709_251_200, f64::NAN);
        assert!(matches!(
            yahoo_quote_to_bar(&q),
            Err(MarketDataError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn test_bars_to_series_sorts_and_skips_invalid() {
        let quotes = vec![
            quote(1_709_337_600, 272.0),
            quote(1_709_251_200, f64::NAN),
            quote(1_709_164_800, 268.0),
        ];
        let series = bars_to_series(&eqnr(), &quotes).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![268.0, 272.0]);
    }

    #[test]
    fn test_empty_quotes_is_no_data() {
        let result = bars_to_series(&eqnr(), &[]);
        assert!(matches!(result, Err(MarketDataError::NoDataForRange)));
    }

    #[test]
    fn test_classify_rate_limit_message() {
        let error = classify_message(
            "fetching the data from yahoo! finance failed: 429 Too Many Requests".to_string(),
        );
        assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    }

    #[test]
    fn test_classify_timeout_message() {
        let error = classify_message("operation timed out".to_string());
        assert!(matches!(error, MarketDataError::Timeout { .. }));
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_classify_other_message() {
        let error = classify_message("connection refused".to_string());
        assert!(matches!(error, MarketDataError::ProviderError { .. }));
    }

    #[test]
    fn test_no_quotes_is_symbol_not_found() {
        let error = map_yahoo_error(&eqnr(), yahoo::YahooError::NoQuotes);
        assert!(matches!(error, MarketDataError::SymbolNotFound(ref s) if s == "EQNR.OL"));
        assert_eq!(error.retry_class(), RetryClass::NoData);
    }
}
