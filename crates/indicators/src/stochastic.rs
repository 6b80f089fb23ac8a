//! Stochastic oscillator %K.

/// Value reported before the window fills and for a flat range.
pub const NEUTRAL_STOCHASTIC: f64 = 50.0;

/// `%K[i] = 100 × (close - lowest low) / (highest high - lowest low)` over
/// the trailing `window` bars.
///
/// Indices before `window` bars exist and windows with a zero high-low range
/// report [`NEUTRAL_STOCHASTIC`]. Values are clamped to `[0, 100]`. The three
/// slices are expected to have equal length; extra elements are ignored.
pub fn stochastic_k(highs: &[f64], lows: &[f64], closes: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let len = closes.len().min(highs.len()).min(lows.len());

    (0..len)
        .map(|i| {
            if i + 1 < window {
                return NEUTRAL_STOCHASTIC;
            }
            let start = i + 1 - window;
            let highest = highs[start..=i]
                .iter()
                .copied()
                .fold(f64::NEG_INFINITY, f64::max);
            let lowest = lows[start..=i]
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min);

            let range = highest - lowest;
            if range <= 0.0 || !range.is_finite() {
                return NEUTRAL_STOCHASTIC;
            }
            (100.0 * (closes[i] - lowest) / range).clamp(0.0, 100.0)
        })
        .collect()
}
