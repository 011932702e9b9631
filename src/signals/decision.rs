//! Signal direction and risk levels derived from the winning confluence

use crate::config::AnalysisConfig;
use crate::indicators::volatility::atr::{atr_or_fallback, DEFAULT_ATR_PERIOD};
use crate::models::analysis::AnalysisResult;
use crate::models::bar::PriceBar;
use crate::models::confluence::ConfluencePoint;
use crate::models::signal::{Signal, SignalDirection, SIGNAL_PROVENANCE};
use crate::models::timeframe::Timeframe;
use chrono::Utc;

/// Half-width of the band around the current price that yields `Hold`.
pub const DIRECTION_DEAD_ZONE: f64 = 0.001;
/// Bars scanned for the structural stop.
pub const STRUCTURE_LOOKBACK: usize = 20;
/// Offset beyond the recent extreme for the structural stop.
pub const STRUCTURE_BUFFER: f64 = 0.001;

pub struct StopLossTakeProfit;

impl StopLossTakeProfit {
    /// Buy when the confluence sits above the dead zone, sell when below.
    pub fn direction(confluence_price: f64, current_price: f64) -> SignalDirection {
        if confluence_price > current_price * (1.0 + DIRECTION_DEAD_ZONE) {
            SignalDirection::Buy
        } else if confluence_price < current_price * (1.0 - DIRECTION_DEAD_ZONE) {
            SignalDirection::Sell
        } else {
            SignalDirection::Hold
        }
    }

    /// Stop-loss from ATR and recent structure; the tighter of the two wins.
    ///
    /// Buy stops never sit above entry and sell stops never below it.
    pub fn calculate_stop_loss(
        bars: &[PriceBar],
        direction: SignalDirection,
        entry_price: f64,
        atr_multiplier: f64,
    ) -> Option<f64> {
        let atr = atr_or_fallback(bars, DEFAULT_ATR_PERIOD);
        let recent = &bars[bars.len().saturating_sub(STRUCTURE_LOOKBACK)..];

        match direction {
            SignalDirection::Buy => {
                let atr_stop = entry_price - atr * atr_multiplier;
                let stop = match recent_low(recent) {
                    Some(low) => atr_stop.max(low * (1.0 - STRUCTURE_BUFFER)),
                    None => atr_stop,
                };
                Some(stop.min(entry_price))
            }
            SignalDirection::Sell => {
                let atr_stop = entry_price + atr * atr_multiplier;
                let stop = match recent_high(recent) {
                    Some(high) => atr_stop.min(high * (1.0 + STRUCTURE_BUFFER)),
                    None => atr_stop,
                };
                Some(stop.max(entry_price))
            }
            SignalDirection::Hold => None,
        }
    }

    /// Take-profit: the confluence price, replaced by an `entry ± risk × ratio`
    /// target whenever a risk/reward ratio is configured and a stop exists.
    pub fn calculate_take_profit(
        direction: SignalDirection,
        entry_price: f64,
        confluence_price: f64,
        stop_loss: Option<f64>,
        risk_reward_ratio: Option<f64>,
    ) -> Option<f64> {
        if direction == SignalDirection::Hold {
            return None;
        }

        match (stop_loss, risk_reward_ratio) {
            (Some(stop), Some(ratio)) => {
                let reward = (entry_price - stop).abs() * ratio;
                Some(match direction {
                    SignalDirection::Buy => entry_price + reward,
                    _ => entry_price - reward,
                })
            }
            _ => Some(confluence_price),
        }
    }

    /// Build the signal for the winning confluence. Entry is the current price.
    pub fn build_signal(
        symbol: &str,
        timeframe: Timeframe,
        bars: &[PriceBar],
        current_price: f64,
        confluence: &ConfluencePoint,
        analyses: Vec<AnalysisResult>,
        config: &AnalysisConfig,
    ) -> Signal {
        let entry_price = current_price;
        let direction = Self::direction(confluence.price_level, current_price);
        let stop_loss =
            Self::calculate_stop_loss(bars, direction, entry_price, config.atr_multiplier_sl);
        let take_profit = Self::calculate_take_profit(
            direction,
            entry_price,
            confluence.price_level,
            stop_loss,
            config.risk_reward_ratio,
        );

        Signal {
            symbol: symbol.to_string(),
            timeframe,
            direction,
            entry_price,
            stop_loss,
            take_profit,
            current_price,
            confluence_score: confluence.strength,
            technical_analyses: analyses,
            created_by: SIGNAL_PROVENANCE.to_string(),
            created_at: Utc::now(),
            lot_size: config.lot_size,
            risk_per_trade: config.risk_per_trade,
        }
    }
}

fn recent_low(bars: &[PriceBar]) -> Option<f64> {
    bars.iter()
        .map(|b| b.low)
        .filter(|v| v.is_finite())
        .min_by(|a, b| a.total_cmp(b))
}

fn recent_high(bars: &[PriceBar]) -> Option<f64> {
    bars.iter()
        .map(|b| b.high)
        .filter(|v| v.is_finite())
        .max_by(|a, b| a.total_cmp(b))
}
