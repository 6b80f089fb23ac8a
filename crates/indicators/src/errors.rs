use thiserror::Error;

/// Errors raised when building an [`IndicatorEngine`](crate::IndicatorEngine).
///
/// Computation itself never fails; only an invalid configuration is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    /// A lookback window or span was zero.
    #[error("Invalid window for {name}: must be at least 1")]
    ZeroWindow { name: &'static str },

    /// The Bollinger band multiplier was negative or not finite.
    #[error("Invalid Bollinger multiplier {0}: must be finite and non-negative")]
    InvalidMultiplier(f64),

    /// The MACD fast span was not shorter than the slow span.
    #[error("Invalid MACD spans: fast ({fast}) must be shorter than slow ({slow})")]
    InvalidMacdSpans { fast: usize, slow: usize },
}
