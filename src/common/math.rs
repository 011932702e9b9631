//! Small numeric helpers shared by the indicators.

/// True range of a bar. Without a prior close it is the bar's own range.
/// Never negative, even for a bar whose high and low are swapped.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    let range = (high - low).abs();
    match prev_close {
        Some(prev) => range.max((high - prev).abs()).max((low - prev).abs()),
        None => range,
    }
}

/// Simple moving average of the last `period` values.
///
/// `None` when there are fewer than `period` values or any of them is not finite.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    if window.iter().any(|v| !v.is_finite()) {
        return None;
    }
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Mean of the finite values, `None` when there are none.
pub fn mean_finite(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
