//! Unit tests for analysis configuration

use confluence_engine::config::{AnalysisConfig, AnalysisWeights};
use confluence_engine::error::ConfigError;
use confluence_engine::models::AnalysisKind;

#[test]
fn test_defaults() {
    let config = AnalysisConfig::default();
    assert_eq!(config.confluence_threshold, 0.6);
    assert_eq!(config.atr_multiplier_sl, 2.0);
    assert_eq!(config.risk_reward_ratio, None);
    assert_eq!(config.lot_size, 0.1);
    assert_eq!(config.risk_per_trade, 2.0);
    assert_eq!(config.timeframe, "H1");
    for kind in AnalysisKind::ALL {
        assert!(config.is_enabled(kind));
        assert_eq!(config.weights.get(kind), 0.25);
    }
}

#[test]
fn test_without_disables_one_kind() {
    let config = AnalysisConfig::default().without(AnalysisKind::ChartPattern);
    assert!(!config.is_enabled(AnalysisKind::ChartPattern));
    assert!(config.is_enabled(AnalysisKind::WaveAnalysis));
    assert!(config.is_enabled(AnalysisKind::FibonacciLevels));
    assert!(config.is_enabled(AnalysisKind::SupportResistance));
}

#[test]
fn test_weight_out_of_range_rejected() {
    let mut weights = AnalysisWeights::default();
    weights.fibonacci = 1.5;
    let config = AnalysisConfig::default().with_weights(weights);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { field: "fibonacci_weight", .. })
    ));
}

#[test]
fn test_weights_need_not_sum_to_one() {
    let config = AnalysisConfig::default().with_weights(AnalysisWeights::uniform(1.0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_nan_threshold_rejected() {
    let config = AnalysisConfig::default().with_threshold(f64::NAN);
    assert!(config.validate().is_err());
}

#[test]
fn test_risk_per_trade_bounds() {
    let mut config = AnalysisConfig::default();
    config.risk_per_trade = 12.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { field: "risk_per_trade", .. })
    ));
    config.risk_per_trade = 0.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotPositive { field: "risk_per_trade", .. })
    ));
}

#[test]
fn test_config_serializes_round_trip() {
    let config = AnalysisConfig::default().with_risk_reward_ratio(2.0);
    let json = serde_json::to_string(&config).unwrap();
    let parsed = AnalysisConfig::from_json_str(&json).unwrap();
    assert_eq!(parsed, config);
}
