//! Bollinger bands.

use crate::moving_average::{mean, sma};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bands at `SMA(window) ± multiplier × stddev`, where stddev is the sample
/// standard deviation (n - 1) of the trailing closes available, up to
/// `window`. A single point has zero deviation.
pub fn bollinger(closes: &[f64], window: usize, multiplier: f64) -> BollingerBands {
    let window = window.max(1);
    let middle = sma(closes, window);

    let mut upper = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());

    for (i, mid) in middle.iter().enumerate() {
        let start = (i + 1).saturating_sub(window);
        let width = multiplier * sample_std_dev(&closes[start..=i]);
        upper.push(mid + width);
        lower.push(mid - width);
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
