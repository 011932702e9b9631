use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar. Series are ordered oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl PriceBar {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// True when the bar's high or low falls within `±tolerance` (a fraction) of `price`.
    pub fn touches(&self, price: f64, tolerance: f64) -> bool {
        let (lower, upper) = (price * (1.0 - tolerance), price * (1.0 + tolerance));
        (self.high >= lower && self.high <= upper) || (self.low >= lower && self.low <= upper)
    }
}

/// Close of the most recent bar.
pub fn current_price(bars: &[PriceBar]) -> Option<f64> {
    bars.last().map(|bar| bar.close)
}
