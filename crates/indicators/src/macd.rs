//! Moving average convergence/divergence.

use crate::moving_average::ema;

/// MACD line, signal line and histogram, each aligned with the input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Macd {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// `macd = EMA(fast) - EMA(slow)`, `signal = EMA(signal_span)` of the MACD
/// line, `histogram = macd - signal`.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_span: usize) -> Macd {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let macd: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema(&macd, signal_span);
    let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

    Macd {
        macd,
        signal,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_series_has_zero_macd() {
        let out = macd(&[50.0; 40], 12, 26, 9);
        assert!(out.macd.iter().all(|v| v.abs() < 1e-9));
        assert!(out.histogram.iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn test_uptrend_has_positive_macd() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = macd(&closes, 12, 26, 9);
        assert!(*out.macd.last().unwrap() > 0.0);
        assert_eq!(out.macd.len(), 60);
        assert_eq!(out.signal.len(), 60);
        assert_eq!(out.histogram.len(), 60);
    }

    #[test]
    fn test_first_values_are_zero() {
        let out = macd(&[10.0, 12.0], 12, 26, 9);
        assert_eq!(out.macd[0], 0.0);
        assert_eq!(out.signal[0], 0.0);
    }
}
