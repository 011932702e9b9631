//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::bar::PriceBar;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ATR_PERIOD: usize = 14;

/// Value used in place of ATR when the history is too short.
pub const ATR_FALLBACK: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtrIndicator {
    pub value: f64,
    pub period: usize,
}

/// True range of every bar; the first bar has no prior close and uses its own range.
pub fn true_ranges(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let prev_close = i.checked_sub(1).map(|p| bars[p].close);
            math::true_range(bar.high, bar.low, prev_close)
        })
        .collect()
}

/// Calculate ATR as the rolling mean of true range over the last `period` bars.
///
/// `None` when fewer than `period` bars exist or the window holds a non-finite value.
pub fn calculate_atr(bars: &[PriceBar], period: usize) -> Option<AtrIndicator> {
    if bars.len() < period {
        return None;
    }

    let tr_values = true_ranges(bars);
    let value = math::sma(&tr_values, period)?;

    Some(AtrIndicator { value, period })
}

/// Latest ATR, or [`ATR_FALLBACK`] when it cannot be computed.
pub fn atr_or_fallback(bars: &[PriceBar], period: usize) -> f64 {
    calculate_atr(bars, period)
        .map(|atr| atr.value)
        .unwrap_or(ATR_FALLBACK)
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(bars: &[PriceBar]) -> Option<AtrIndicator> {
    calculate_atr(bars, DEFAULT_ATR_PERIOD)
}
