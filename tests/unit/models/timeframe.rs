//! Unit tests for timeframe parsing

use confluence_engine::error::ConfigError;
use confluence_engine::models::Timeframe;

#[test]
fn test_parse_canonical_labels() {
    assert_eq!(Timeframe::parse("M1").unwrap(), Timeframe::M1);
    assert_eq!(Timeframe::parse("H4").unwrap(), Timeframe::H4);
    assert_eq!(Timeframe::parse("W1").unwrap(), Timeframe::W1);
}

#[test]
fn test_parse_aliases() {
    assert_eq!(Timeframe::parse("1h").unwrap(), Timeframe::H1);
    assert_eq!(Timeframe::parse("60m").unwrap(), Timeframe::H1);
    assert_eq!(Timeframe::parse("15M").unwrap(), Timeframe::M15);
    assert_eq!(Timeframe::parse("d1").unwrap(), Timeframe::D1);
    assert_eq!(Timeframe::parse(" 4h ").unwrap(), Timeframe::H4);
}

#[test]
fn test_blank_defaults_to_h1() {
    assert_eq!(Timeframe::parse("").unwrap(), Timeframe::H1);
    assert_eq!(Timeframe::parse("   ").unwrap(), Timeframe::H1);
    assert_eq!(Timeframe::default(), Timeframe::H1);
}

#[test]
fn test_unknown_timeframe_rejected() {
    assert_eq!(
        Timeframe::parse("H2"),
        Err(ConfigError::InvalidTimeframe("H2".to_string()))
    );
    assert!("3d".parse::<Timeframe>().is_err());
}

#[test]
fn test_display_matches_label() {
    assert_eq!(Timeframe::M30.to_string(), "M30");
    assert_eq!(serde_json::to_string(&Timeframe::D1).unwrap(), "\"D1\"");
}
