use crate::models::analysis::AnalysisResult;
use crate::models::timeframe::Timeframe;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SIGNAL_PROVENANCE: &str = "ai_system";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
    Hold,
}

/// Actionable output of a successful confluence detection.
///
/// `stop_loss` and `take_profit` are `None` exactly when the direction is `Hold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub direction: SignalDirection,
    pub entry_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    pub current_price: f64,
    pub confluence_score: f64,
    pub technical_analyses: Vec<AnalysisResult>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub lot_size: f64,
    pub risk_per_trade: f64,
}

impl Signal {
    pub fn is_actionable(&self) -> bool {
        self.direction != SignalDirection::Hold
    }

    /// Target distance over stop distance, when both levels exist.
    pub fn risk_reward(&self) -> Option<f64> {
        let stop = self.stop_loss?;
        let target = self.take_profit?;
        let risk = (self.entry_price - stop).abs();
        if risk > 0.0 {
            Some((target - self.entry_price).abs() / risk)
        } else {
            None
        }
    }
}
