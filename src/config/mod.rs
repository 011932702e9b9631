//! Analysis configuration and environment lookup.

use crate::error::ConfigError;
use crate::models::analysis::AnalysisKind;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Deployment environment (`APP_ENV`), defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Per-analysis weights. They are not required to sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisWeights {
    pub elliott_wave: f64,
    pub chart_patterns: f64,
    pub fibonacci: f64,
    pub support_resistance: f64,
}

impl AnalysisWeights {
    pub const DEFAULT_WEIGHT: f64 = 0.25;

    /// Same weight for every analysis kind.
    pub fn uniform(weight: f64) -> Self {
        Self {
            elliott_wave: weight,
            chart_patterns: weight,
            fibonacci: weight,
            support_resistance: weight,
        }
    }

    pub fn get(&self, kind: AnalysisKind) -> f64 {
        match kind {
            AnalysisKind::WaveAnalysis => self.elliott_wave,
            AnalysisKind::ChartPattern => self.chart_patterns,
            AnalysisKind::FibonacciLevels => self.fibonacci,
            AnalysisKind::SupportResistance => self.support_resistance,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_range("elliott_wave_weight", self.elliott_wave, 0.0, 1.0)?;
        check_range("chart_patterns_weight", self.chart_patterns, 0.0, 1.0)?;
        check_range("fibonacci_weight", self.fibonacci, 0.0, 1.0)?;
        check_range("support_resistance_weight", self.support_resistance, 0.0, 1.0)
    }
}

impl Default for AnalysisWeights {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_WEIGHT)
    }
}

/// Caller-supplied configuration for one evaluation.
///
/// Missing fields in serialized input fall back to the defaults, so a partial
/// JSON document merges over [`AnalysisConfig::default`]. `lot_size` and
/// `risk_per_trade` are carried onto the signal but never used in scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub confluence_threshold: f64,
    pub atr_multiplier_sl: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_reward_ratio: Option<f64>,
    pub risk_per_trade: f64,
    pub lot_size: f64,

    pub enable_elliott_wave: bool,
    pub enable_chart_patterns: bool,
    pub enable_fibonacci: bool,
    pub enable_support_resistance: bool,

    pub weights: AnalysisWeights,
    pub timeframe: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confluence_threshold: 0.6,
            atr_multiplier_sl: 2.0,
            risk_reward_ratio: None,
            risk_per_trade: 2.0,
            lot_size: 0.1,
            enable_elliott_wave: true,
            enable_chart_patterns: true,
            enable_fibonacci: true,
            enable_support_resistance: true,
            weights: AnalysisWeights::default(),
            timeframe: "H1".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Resolve an optional caller config into the validated value every
    /// pipeline stage receives.
    pub fn resolve(config: Option<&AnalysisConfig>) -> Result<AnalysisConfig, ConfigError> {
        let resolved = config.cloned().unwrap_or_default();
        resolved.validate()?;
        Ok(resolved)
    }

    pub fn from_json_str(raw: &str) -> Result<AnalysisConfig, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<AnalysisConfig> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&raw)?)
    }

    pub fn with_risk_reward_ratio(mut self, ratio: f64) -> Self {
        self.risk_reward_ratio = Some(ratio);
        self
    }

    pub fn with_weights(mut self, weights: AnalysisWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.confluence_threshold = threshold;
        self
    }

    pub fn is_enabled(&self, kind: AnalysisKind) -> bool {
        match kind {
            AnalysisKind::WaveAnalysis => self.enable_elliott_wave,
            AnalysisKind::ChartPattern => self.enable_chart_patterns,
            AnalysisKind::FibonacciLevels => self.enable_fibonacci,
            AnalysisKind::SupportResistance => self.enable_support_resistance,
        }
    }

    /// Disable a single analysis kind.
    pub fn without(mut self, kind: AnalysisKind) -> Self {
        match kind {
            AnalysisKind::WaveAnalysis => self.enable_elliott_wave = false,
            AnalysisKind::ChartPattern => self.enable_chart_patterns = false,
            AnalysisKind::FibonacciLevels => self.enable_fibonacci = false,
            AnalysisKind::SupportResistance => self.enable_support_resistance = false,
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("confluence_threshold", self.confluence_threshold, 0.0, 1.0)?;
        check_positive("atr_multiplier_sl", self.atr_multiplier_sl)?;
        if let Some(ratio) = self.risk_reward_ratio {
            check_positive("risk_reward_ratio", ratio)?;
        }
        check_positive("lot_size", self.lot_size)?;
        check_positive("risk_per_trade", self.risk_per_trade)?;
        check_range("risk_per_trade", self.risk_per_trade, 0.0, 10.0)?;
        self.weights.validate()
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
