use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// One OHLCV observation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    /// Timestamp of the observation
    pub timestamp: DateTime<Utc>,

    /// Opening price
    pub open: Decimal,

    /// High price
    pub high: Decimal,

    /// Low price
    pub low: Decimal,

    /// Closing price
    pub close: Decimal,

    /// Trading volume. Absent for currency pairs and other non-equity instruments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
}

impl Bar {
    /// Create a full OHLCV bar
    pub fn ohlcv(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume: Some(volume),
        }
    }

    /// Create a bar where every price equals `close` and there is no volume.
    pub fn flat(timestamp: DateTime<Utc>, close: Decimal) -> Self {
        Self {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: None,
        }
    }

    pub fn close_f64(&self) -> f64 {
        to_f64(self.close)
    }

    pub fn high_f64(&self) -> f64 {
        to_f64(self.high)
    }

    pub fn low_f64(&self) -> f64 {
        to_f64(self.low)
    }
}

/// Decimal prices always fit an f64; the fallback only guards the API.
fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Latest price with change against the previous close.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub symbol: Symbol,
    pub timestamp: DateTime<Utc>,
    pub price: Decimal,
    pub change: Decimal,
    pub change_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,
}

impl QuoteSummary {
    /// Build a summary from the latest bar and the one before it, if any.
    pub fn from_bars(symbol: Symbol, latest: &Bar, previous: Option<&Bar>) -> Self {
        // A zero or tiny previous close has no meaningful percentage.
        let (change, change_percent) = match previous {
            Some(prev) => {
                let change = latest.close.checked_sub(prev.close).unwrap_or(Decimal::ZERO);
                let percent = change
                    .checked_div(prev.close)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .map(|p| p.round_dp(4))
                    .unwrap_or(Decimal::ZERO);
                (change, percent)
            }
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        Self {
            symbol,
            timestamp: latest.timestamp,
            price: latest.close,
            change,
            change_percent,
            volume: latest.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_bar_ohlcv() {
        let bar = Bar::ohlcv(
            day(1),
            dec!(268.00),
            dec!(272.00),
            dec!(267.50),
            dec!(270.50),
            dec!(1000000),
        );
        assert_eq!(bar.open, dec!(268.00));
        assert_eq!(bar.high, dec!(272.00));
        assert_eq!(bar.low, dec!(267.50));
        assert_eq!(bar.close, dec!(270.50));
        assert_eq!(bar.volume, Some(dec!(1000000)));
        assert_eq!(bar.close_f64(), 270.5);
    }

    #[test]
    fn test_bar_flat_has_no_volume() {
        let bar = Bar::flat(day(1), dec!(11.25));
        assert_eq!(bar.high, bar.low);
        assert!(bar.volume.is_none());
    }

    #[test]
    fn test_summary_change() {
        let symbol = Symbol::parse("DNB.OL").unwrap();
        let prev = Bar::flat(day(1), dec!(200));
        let latest = Bar::flat(day(2), dec!(210));

        let summary = QuoteSummary::from_bars(symbol, &latest, Some(&prev));
        assert_eq!(summary.price, dec!(210));
        assert_eq!(summary.change, dec!(10));
        assert_eq!(summary.change_percent, dec!(5));
    }

    #[test]
    fn test_summary_single_bar_has_zero_change() {
        let symbol = Symbol::parse("EQNR.OL").unwrap();
        let latest = Bar::flat(day(1), dec!(270.50));

        let summary = QuoteSummary::from_bars(symbol, &latest, None);
        assert_eq!(summary.change, Decimal::ZERO);
        assert_eq!(summary.change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_summary_tiny_previous_close_does_not_overflow() {
        let symbol = Symbol::parse("EQNR.OL").unwrap();
        let prev = Bar::flat(day(1), Decimal::new(1, 28));
        let latest = Bar::flat(day(2), dec!(79228162514264337593543950));

        let summary = QuoteSummary::from_bars(symbol, &latest, Some(&prev));
        assert_eq!(summary.price, latest.close);
        assert_eq!(summary.change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_summary_zero_previous_close() {
        let symbol = Symbol::parse("EQNR.OL").unwrap();
        let prev = Bar::flat(day(1), Decimal::ZERO);
        let latest = Bar::flat(day(2), dec!(270.50));

        let summary = QuoteSummary::from_bars(symbol, &latest, Some(&prev));
        assert_eq!(summary.change, dec!(270.50));
        assert_eq!(summary.change_percent, Decimal::ZERO);
    }
}
