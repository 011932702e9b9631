//! Swing high/low Fibonacci retracement levels

use crate::models::analysis::FibonacciLevel;
use crate::models::bar::PriceBar;

pub const DEFAULT_SWING_LOOKBACK: usize = 100;

pub const RETRACEMENT_RATIOS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

const KEY_RATIO_STRENGTH: f64 = 0.8;
const MINOR_RATIO_STRENGTH: f64 = 0.6;

/// 0.382 and 0.618 carry more weight than the other ratios.
pub fn ratio_strength(ratio: f64) -> f64 {
    if (ratio - 0.382).abs() < 1e-9 || (ratio - 0.618).abs() < 1e-9 {
        KEY_RATIO_STRENGTH
    } else {
        MINOR_RATIO_STRENGTH
    }
}

/// Retracement levels between the swing high and swing low of the last
/// `lookback` bars.
///
/// When the low came first the move was up and levels are measured down
/// from the high; otherwise they are measured up from the low. Empty when
/// there are no bars or the range is flat.
pub fn calculate_retracements(bars: &[PriceBar], lookback: usize) -> Vec<FibonacciLevel> {
    let window = &bars[bars.len().saturating_sub(lookback)..];

    let swing_high = window
        .iter()
        .enumerate()
        .filter(|(_, b)| b.high.is_finite())
        .max_by(|(_, a), (_, b)| a.high.total_cmp(&b.high));
    let swing_low = window
        .iter()
        .enumerate()
        .filter(|(_, b)| b.low.is_finite())
        .min_by(|(_, a), (_, b)| a.low.total_cmp(&b.low));

    let (Some((high_idx, high_bar)), Some((low_idx, low_bar))) = (swing_high, swing_low) else {
        return Vec::new();
    };

    let (high, low) = (high_bar.high, low_bar.low);
    let range = high - low;
    if range <= 0.0 {
        return Vec::new();
    }

    let uptrend = low_idx <= high_idx;

    RETRACEMENT_RATIOS
        .iter()
        .map(|&ratio| FibonacciLevel {
            price: if uptrend {
                high - range * ratio
            } else {
                low + range * ratio
            },
            ratio,
            strength: ratio_strength(ratio),
        })
        .collect()
}
