//! Relative Strength Index.

use crate::moving_average::mean;

/// Value reported before enough history exists, and for empty input.
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI over a trailing window of close-to-close deltas.
///
/// Gains and losses are averaged with a simple mean over the last `window`
/// deltas. `RSI[i]` is defined once `window` deltas exist (`i >= window`);
/// earlier indices report [`NEUTRAL_RSI`]. A window without losses yields
/// 100. Every value lies in `[0, 100]`.
pub fn rsi(closes: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    (0..closes.len())
        .map(|i| {
            if i < window {
                return NEUTRAL_RSI;
            }
            // deltas[j] is the change into closes[j + 1]
            let recent = &deltas[i - window..i];
            rsi_from_deltas(recent)
        })
        .collect()
}

fn rsi_from_deltas(deltas: &[f64]) -> f64 {
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let mean_gain = mean(&gains);
    let mean_loss = mean(&losses);

    if mean_loss == 0.0 {
        return 100.0;
    }

    let rs = mean_gain / mean_loss;
    let value = 100.0 - 100.0 / (1.0 + rs);
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        NEUTRAL_RSI
    }
}
