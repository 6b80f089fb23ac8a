//! Computes the full indicator set for a price series.

use borsvakt_market_data::PriceSeries;
use log::debug;

use crate::bollinger::bollinger;
use crate::config::IndicatorConfig;
use crate::errors::IndicatorError;
use crate::macd::macd;
use crate::moving_average::{ema, sma};
use crate::rsi::{rsi, NEUTRAL_RSI};
use crate::set::IndicatorSet;
use crate::stochastic::{stochastic_k, NEUTRAL_STOCHASTIC};

/// Key of the MACD line.
pub const MACD: &str = "macd";
pub const MACD_SIGNAL: &str = "macd_signal";
pub const MACD_HISTOGRAM: &str = "macd_histogram";
pub const BOLLINGER_UPPER: &str = "bollinger_upper";
pub const BOLLINGER_MIDDLE: &str = "bollinger_middle";
pub const BOLLINGER_LOWER: &str = "bollinger_lower";
/// Key of the latest stochastic %K.
pub const STOCHASTIC_K: &str = "stochastic_k";

/// Pure indicator engine.
///
/// Windows are fixed at construction. [`compute`](Self::compute) does no I/O,
/// never fails and returns the same set for the same series.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    /// Build an engine from a validated configuration.
    pub fn new(config: IndicatorConfig) -> Result<Self, IndicatorError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    pub fn sma_key(window: usize) -> String {
        format!("sma_{}", window)
    }

    pub fn ema_key(span: usize) -> String {
        format!("ema_{}", span)
    }

    pub fn rsi_key(window: usize) -> String {
        format!("rsi_{}", window)
    }

    /// Every key [`compute`](Self::compute) produces with this configuration.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .config
            .sma_windows
            .iter()
            .map(|w| Self::sma_key(*w))
            .collect();
        keys.push(Self::ema_key(self.config.ema_fast));
        keys.push(Self::ema_key(self.config.ema_slow));
        keys.push(Self::rsi_key(self.config.rsi_window));
        keys.extend(
            [
                MACD,
                MACD_SIGNAL,
                MACD_HISTOGRAM,
                BOLLINGER_UPPER,
                BOLLINGER_MIDDLE,
                BOLLINGER_LOWER,
                STOCHASTIC_K,
            ]
            .map(String::from),
        );
        keys.sort();
        keys.dedup();
        keys
    }

    /// Derive every configured indicator from `series`.
    ///
    /// Series-shaped values are aligned with the input (empty for an empty
    /// series). RSI and %K are reported as their latest value, neutral (50)
    /// when history is too short.
    pub fn compute(&self, series: &PriceSeries) -> IndicatorSet {
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();
        let cfg = &self.config;

        let mut set = IndicatorSet::new();

        for &window in &cfg.sma_windows {
            set.insert_series(Self::sma_key(window), sma(&closes, window));
        }
        set.insert_series(Self::ema_key(cfg.ema_fast), ema(&closes, cfg.ema_fast));
        set.insert_series(Self::ema_key(cfg.ema_slow), ema(&closes, cfg.ema_slow));

        let lines = macd(&closes, cfg.ema_fast, cfg.ema_slow, cfg.macd_signal);
        set.insert_series(MACD, lines.macd);
        set.insert_series(MACD_SIGNAL, lines.signal);
        set.insert_series(MACD_HISTOGRAM, lines.histogram);

        let bands = bollinger(&closes, cfg.bollinger_window, cfg.bollinger_multiplier);
        set.insert_series(BOLLINGER_UPPER, bands.upper);
        set.insert_series(BOLLINGER_MIDDLE, bands.middle);
        set.insert_series(BOLLINGER_LOWER, bands.lower);

        let latest_rsi = rsi(&closes, cfg.rsi_window)
            .last()
            .copied()
            .unwrap_or(NEUTRAL_RSI);
        set.insert_scalar(Self::rsi_key(cfg.rsi_window), latest_rsi);

        let latest_k = stochastic_k(&highs, &lows, &closes, cfg.stochastic_window)
            .last()
            .copied()
            .unwrap_or(NEUTRAL_STOCHASTIC);
        set.insert_scalar(STOCHASTIC_K, latest_k);

        debug!(
            "Computed {} indicators for '{}' over {} observations",
            set.len(),
            series.symbol(),
            series.len()
        );
        set
    }
}
