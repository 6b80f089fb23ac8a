use serde::Serialize;

use super::quote::{Bar, QuoteSummary};
use super::symbol::Symbol;
use crate::errors::MarketDataError;

/// Ordered observations for one symbol, oldest first.
///
/// Timestamps are strictly increasing. The series is immutable once built;
/// a fresh one is produced by every successful fetch.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSeries {
    symbol: Symbol,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series from bars that are already ordered.
    ///
    /// Fails if any timestamp is not strictly greater than its predecessor.
    pub fn new(symbol: Symbol, bars: Vec<Bar>) -> Result<Self, MarketDataError> {
        if let Some(pos) = bars
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(MarketDataError::ValidationFailed {
                message: format!(
                    "{}: timestamp at index {} is not after {}",
                    symbol,
                    pos + 1,
                    bars[pos].timestamp
                ),
            });
        }

        Ok(Self { symbol, bars })
    }

    /// Build a series from provider output in any order.
    ///
    /// Bars are sorted by timestamp; for duplicated timestamps the bar that
    /// came last in the input wins.
    pub fn from_unordered(symbol: Symbol, mut bars: Vec<Bar>) -> Self {
        // Stable sort keeps input order among equal timestamps.
        bars.sort_by_key(|bar| bar.timestamp);

        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.timestamp == bar.timestamp => *last = bar,
                _ => deduped.push(bar),
            }
        }

        Self {
            symbol,
            bars: deduped,
        }
    }

    pub fn empty(symbol: Symbol) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::close_f64).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::high_f64).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(Bar::low_f64).collect()
    }

    /// Summary of the latest bar, or `None` for an empty series.
    pub fn quote(&self) -> Option<QuoteSummary> {
        let (latest, rest) = self.bars.split_last()?;
        Some(QuoteSummary::from_bars(
            self.symbol.clone(),
            latest,
            rest.last(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    fn symbol() -> Symbol {
        Symbol::parse("EQNR.OL").unwrap()
    }

    #[test]
    fn test_new_accepts_increasing() {
        let bars = vec![
            Bar::flat(day(1), dec!(270)),
            Bar::flat(day(2), dec!(271)),
            Bar::flat(day(4), dec!(269)),
        ];
        let series = PriceSeries::new(symbol(), bars).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![270.0, 271.0, 269.0]);
    }

    #[test]
    fn test_new_rejects_duplicate_timestamp() {
        let bars = vec![Bar::flat(day(1), dec!(270)), Bar::flat(day(1), dec!(271))];
        let err = PriceSeries::new(symbol(), bars).unwrap_err();
        assert!(matches!(err, MarketDataError::ValidationFailed { .. }));
    }

    #[test]
    fn test_new_rejects_out_of_order() {
        let bars = vec![Bar::flat(day(2), dec!(270)), Bar::flat(day(1), dec!(271))];
        assert!(PriceSeries::new(symbol(), bars).is_err());
    }

    #[test]
    fn test_from_unordered_sorts_and_dedups() {
        let bars = vec![
            Bar::flat(day(3), dec!(3)),
            Bar::flat(day(1), dec!(1)),
            Bar::flat(day(3), dec!(33)),
            Bar::flat(day(2), dec!(2)),
        ];
        let series = PriceSeries::from_unordered(symbol(), bars);
        assert_eq!(series.closes(), vec![1.0, 2.0, 33.0]);
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::empty(symbol());
        assert!(series.is_empty());
        assert!(series.quote().is_none());
        assert!(series.closes().is_empty());
    }

    #[test]
    fn test_quote_uses_previous_close() {
        let bars = vec![Bar::flat(day(1), dec!(100)), Bar::flat(day(2), dec!(99))];
        let series = PriceSeries::new(symbol(), bars).unwrap();
        let quote = series.quote().unwrap();
        assert_eq!(quote.price, dec!(99));
        assert_eq!(quote.change, dec!(-1));
        assert_eq!(quote.change_percent, dec!(-1));
    }
}
