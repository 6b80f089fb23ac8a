//! Indicator windows and parameters.

use crate::errors::IndicatorError;

/// Lookback windows used by the engine. Key names in the resulting
/// [`IndicatorSet`](crate::IndicatorSet) derive from these values, e.g.
/// `sma_20` or `rsi_14`.
#[derive(Clone, Debug, PartialEq)]
pub struct IndicatorConfig {
    /// Simple moving average windows, one `sma_{w}` series each.
    pub sma_windows: Vec<usize>,
    /// Fast EMA span; also the MACD fast line.
    pub ema_fast: usize,
    /// Slow EMA span; also the MACD slow line.
    pub ema_slow: usize,
    /// EMA span of the MACD signal line.
    pub macd_signal: usize,
    pub rsi_window: usize,
    pub bollinger_window: usize,
    /// Band width in sample standard deviations.
    pub bollinger_multiplier: f64,
    pub stochastic_window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_windows: vec![20, 50],
            ema_fast: 12,
            ema_slow: 26,
            macd_signal: 9,
            rsi_window: 14,
            bollinger_window: 20,
            bollinger_multiplier: 2.0,
            stochastic_window: 14,
        }
    }
}

impl IndicatorConfig {
    pub fn with_sma_windows(mut self, windows: Vec<usize>) -> Self {
        self.sma_windows = windows;
        self
    }

    pub fn with_macd(mut self, fast: usize, slow: usize, signal: usize) -> Self {
        self.ema_fast = fast;
        self.ema_slow = slow;
        self.macd_signal = signal;
        self
    }

    pub fn with_rsi_window(mut self, window: usize) -> Self {
        self.rsi_window = window;
        self
    }

    pub fn with_bollinger(mut self, window: usize, multiplier: f64) -> Self {
        self.bollinger_window = window;
        self.bollinger_multiplier = multiplier;
        self
    }

    pub fn with_stochastic_window(mut self, window: usize) -> Self {
        self.stochastic_window = window;
        self
    }

    /// Check that every window is at least 1, the MACD spans are ordered and
    /// the Bollinger multiplier is usable.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.sma_windows.iter().any(|&w| w == 0) {
            return Err(IndicatorError::ZeroWindow { name: "sma" });
        }

        let windows = [
            ("ema_fast", self.ema_fast),
            ("ema_slow", self.ema_slow),
            ("macd_signal", self.macd_signal),
            ("rsi", self.rsi_window),
            ("bollinger", self.bollinger_window),
            ("stochastic", self.stochastic_window),
        ];
        if let Some(&(name, _)) = windows.iter().find(|(_, w)| *w == 0) {
            return Err(IndicatorError::ZeroWindow { name });
        }

        if self.ema_fast >= self.ema_slow {
            return Err(IndicatorError::InvalidMacdSpans {
                fast: self.ema_fast,
                slow: self.ema_slow,
            });
        }

        if !self.bollinger_multiplier.is_finite() || self.bollinger_multiplier < 0.0 {
            return Err(IndicatorError::InvalidMultiplier(self.bollinger_multiplier));
        }

        Ok(())
    }
}
