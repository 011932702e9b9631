//! Unit tests for direction and risk levels

use crate::common::flat_bars;
use confluence_engine::config::AnalysisConfig;
use confluence_engine::models::{
    AnalysisKind, ConfluencePoint, SignalDirection, Timeframe, SIGNAL_PROVENANCE,
};
use confluence_engine::signals::decision::StopLossTakeProfit;

const CURRENT: f64 = 1.1;

fn confluence_at(price: f64) -> ConfluencePoint {
    ConfluencePoint {
        price_level: price,
        strength: 0.8,
        analyses: vec![AnalysisKind::WaveAnalysis, AnalysisKind::FibonacciLevels],
        description: "test".to_string(),
    }
}

#[test]
fn test_direction_dead_zone() {
    assert_eq!(StopLossTakeProfit::direction(1.1012, CURRENT), SignalDirection::Buy);
    assert_eq!(StopLossTakeProfit::direction(1.1005, CURRENT), SignalDirection::Hold);
    assert_eq!(StopLossTakeProfit::direction(1.0995, CURRENT), SignalDirection::Hold);
    assert_eq!(StopLossTakeProfit::direction(1.0985, CURRENT), SignalDirection::Sell);
}

#[test]
fn test_buy_stop_uses_tighter_structure() {
    let bars = flat_bars(30, CURRENT, 0.0005);
    let stop =
        StopLossTakeProfit::calculate_stop_loss(&bars, SignalDirection::Buy, CURRENT, 2.0).unwrap();
    // ATR stop 1.098, structure 1.0995 * 0.999.
    assert!((stop - 1.0984005).abs() < 1e-9);
}

#[test]
fn test_sell_stop_uses_tighter_structure() {
    let bars = flat_bars(30, CURRENT, 0.0005);
    let stop =
        StopLossTakeProfit::calculate_stop_loss(&bars, SignalDirection::Sell, CURRENT, 2.0).unwrap();
    assert!((stop - 1.1016005).abs() < 1e-9);
}

#[test]
fn test_atr_stop_wins_over_distant_structure() {
    let mut bars = flat_bars(30, CURRENT, 0.0005);
    bars[13].low = 1.095;
    let stop =
        StopLossTakeProfit::calculate_stop_loss(&bars, SignalDirection::Buy, CURRENT, 2.0).unwrap();
    assert!((stop - 1.098).abs() < 1e-9);
}

#[test]
fn test_hold_has_no_levels() {
    let bars = flat_bars(30, CURRENT, 0.0005);
    assert!(
        StopLossTakeProfit::calculate_stop_loss(&bars, SignalDirection::Hold, CURRENT, 2.0)
            .is_none()
    );
    assert!(StopLossTakeProfit::calculate_take_profit(
        SignalDirection::Hold,
        CURRENT,
        1.1005,
        Some(1.09),
        Some(2.0)
    )
    .is_none());
}

#[test]
fn test_take_profit_defaults_to_confluence() {
    let tp = StopLossTakeProfit::calculate_take_profit(
        SignalDirection::Buy,
        CURRENT,
        1.1061,
        Some(1.0984),
        None,
    );
    assert_eq!(tp, Some(1.1061));
}

#[test]
fn test_take_profit_from_risk_reward() {
    let buy = StopLossTakeProfit::calculate_take_profit(
        SignalDirection::Buy,
        CURRENT,
        1.1061,
        Some(1.098),
        Some(2.0),
    )
    .unwrap();
    assert!((buy - 1.104).abs() < 1e-9);

    let sell = StopLossTakeProfit::calculate_take_profit(
        SignalDirection::Sell,
        CURRENT,
        1.0939,
        Some(1.102),
        Some(1.5),
    )
    .unwrap();
    assert!((sell - 1.097).abs() < 1e-9);
}

#[test]
fn test_build_signal() {
    let bars = flat_bars(30, CURRENT, 0.0005);
    let config = AnalysisConfig::default();
    let signal = StopLossTakeProfit::build_signal(
        "EURUSD",
        Timeframe::H1,
        &bars,
        CURRENT,
        &confluence_at(1.1061),
        Vec::new(),
        &config,
    );

    assert_eq!(signal.symbol, "EURUSD");
    assert_eq!(signal.direction, SignalDirection::Buy);
    assert_eq!(signal.entry_price, CURRENT);
    assert_eq!(signal.current_price, CURRENT);
    assert_eq!(signal.take_profit, Some(1.1061));
    assert!((signal.stop_loss.unwrap() - 1.0984005).abs() < 1e-9);
    assert_eq!(signal.confluence_score, 0.8);
    assert_eq!(signal.created_by, SIGNAL_PROVENANCE);
    assert_eq!(signal.lot_size, 0.1);
    assert_eq!(signal.risk_per_trade, 2.0);
    assert!(signal.is_actionable());
    assert!(signal.risk_reward().unwrap() > 0.0);
}

#[test]
fn test_build_hold_signal() {
    let bars = flat_bars(30, CURRENT, 0.0005);
    let signal = StopLossTakeProfit::build_signal(
        "EURUSD",
        Timeframe::H1,
        &bars,
        CURRENT,
        &confluence_at(1.10055),
        Vec::new(),
        &AnalysisConfig::default(),
    );
    assert_eq!(signal.direction, SignalDirection::Hold);
    assert!(signal.stop_loss.is_none());
    assert!(signal.take_profit.is_none());
    assert!(!signal.is_actionable());
}
