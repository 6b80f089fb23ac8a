//! Simple and exponential moving averages.

/// Simple moving average over a trailing window.
///
/// `SMA[i]` is the mean of `values[max(0, i - window + 1)..=i]`: indices
/// before the window fills average over the points available so far. The
/// output has the same length as the input.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..values.len())
        .map(|i| {
            let start = (i + 1).saturating_sub(window);
            mean(&values[start..=i])
        })
        .collect()
}

/// Exponential moving average with smoothing `α = 2 / (span + 1)`.
///
/// Seeded with the first value (`EMA[0] = values[0]`), then
/// `EMA[i] = values[i] * α + EMA[i-1] * (1 - α)`.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span.max(1) as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());

    let mut previous: Option<f64> = None;
    for &value in values {
        let next = match previous {
            Some(prev) => value * alpha + prev * (1.0 - alpha),
            None => value,
        };
        out.push(next);
        previous = Some(next);
    }
    out
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
