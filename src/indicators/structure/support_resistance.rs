//! Support and Resistance levels detection
//!
//! Resistance candidates are local maxima of the highs, supports are local
//! minima of the lows. Each candidate is scored by how often price touched
//! it, how much volume traded near it, and how long it stayed relevant.

use crate::common::math;
use crate::indicators::structure::extrema::{find_local_extrema, ExtremumMode, DEFAULT_EXTREMA_ORDER};
use crate::models::analysis::{LevelType, SupportResistanceLevel, SupportResistanceOutput};
use crate::models::bar::PriceBar;

/// Band used for touch counting and level age.
pub const TOUCH_TOLERANCE: f64 = 0.001;
/// Wider band used for the volume comparison.
pub const VOLUME_TOLERANCE: f64 = 0.002;
/// Levels scoring at or below this are discarded.
pub const MIN_LEVEL_STRENGTH: f64 = 0.3;

const TOUCHES_FOR_FULL_STRENGTH: f64 = 3.0;
const MAX_VOLUME_BONUS: f64 = 0.3;
const MAX_AGE_BONUS: f64 = 0.2;
const CONFIDENCE_SCALE: f64 = 1.2;

/// Number of bars touching `price`: the larger of the high-touch and
/// low-touch counts, not their sum.
pub fn count_touches(bars: &[PriceBar], price: f64, tolerance: f64) -> usize {
    let (lower, upper) = (price * (1.0 - tolerance), price * (1.0 + tolerance));
    let in_band = |v: f64| v >= lower && v <= upper;

    let high_touches = bars.iter().filter(|b| in_band(b.high)).count();
    let low_touches = bars.iter().filter(|b| in_band(b.low)).count();
    high_touches.max(low_touches)
}

/// Excess of average volume on touching bars over the overall average,
/// in `[0, 1]`. Zero without volume data or when touching bars trade no
/// more than usual.
pub fn volume_strength(bars: &[PriceBar], price: f64) -> f64 {
    let touch_volume =
        math::mean_finite(bars.iter().filter(|b| b.touches(price, VOLUME_TOLERANCE)).map(|b| b.volume));
    let avg_volume = math::mean_finite(bars.iter().map(|b| b.volume));

    match (touch_volume, avg_volume) {
        (Some(touch), Some(avg)) if avg > 0.0 => {
            let ratio = touch / avg;
            if ratio > 1.0 {
                (ratio - 1.0).min(1.0)
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Bars between the first and last touch, relative to half the series, capped at 1.
pub fn age_factor(bars: &[PriceBar], price: f64) -> f64 {
    let mut touching = bars
        .iter()
        .enumerate()
        .filter(|(_, b)| b.touches(price, TOUCH_TOLERANCE))
        .map(|(i, _)| i);

    let Some(first) = touching.next() else {
        return 0.0;
    };
    let last = touching.last().unwrap_or(first);

    let max_age = bars.len() as f64 * 0.5;
    if max_age > 0.0 {
        ((last - first) as f64 / max_age).min(1.0)
    } else {
        0.0
    }
}

/// Combined level strength in `[0, 1]`.
pub fn level_strength(bars: &[PriceBar], price: f64) -> f64 {
    let touches = count_touches(bars, price, TOUCH_TOLERANCE) as f64;
    let base = (touches / TOUCHES_FOR_FULL_STRENGTH).min(1.0);
    let volume_bonus = volume_strength(bars, price).min(MAX_VOLUME_BONUS);
    let age_bonus = age_factor(bars, price).min(MAX_AGE_BONUS);

    (base + volume_bonus + age_bonus).clamp(0.0, 1.0)
}

/// Run the support/resistance analysis with the given extrema order.
///
/// Returns `None` when no level clears [`MIN_LEVEL_STRENGTH`].
pub fn calculate_support_resistance(
    bars: &[PriceBar],
    order: usize,
) -> Option<SupportResistanceOutput> {
    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();

    let resistances = find_local_extrema(&highs, order, ExtremumMode::Max)
        .into_iter()
        .map(|i| (highs[i], LevelType::Resistance));
    let supports = find_local_extrema(&lows, order, ExtremumMode::Min)
        .into_iter()
        .map(|i| (lows[i], LevelType::Support));

    let levels: Vec<SupportResistanceLevel> = resistances
        .chain(supports)
        .filter_map(|(price, level_type)| {
            let strength = level_strength(bars, price);
            (strength > MIN_LEVEL_STRENGTH).then(|| SupportResistanceLevel {
                price,
                level_type,
                strength,
                touches: count_touches(bars, price, TOUCH_TOLERANCE),
            })
        })
        .collect();

    if levels.is_empty() {
        return None;
    }

    let avg_strength = levels.iter().map(|l| l.strength).sum::<f64>() / levels.len() as f64;

    Some(SupportResistanceOutput {
        confidence: (avg_strength * CONFIDENCE_SCALE).min(1.0),
        description: format!("Identified {} support/resistance levels", levels.len()),
        levels,
    })
}

/// Calculate support/resistance with the default extrema order (5)
pub fn calculate_support_resistance_default(bars: &[PriceBar]) -> Option<SupportResistanceOutput> {
    calculate_support_resistance(bars, DEFAULT_EXTREMA_ORDER)
}
