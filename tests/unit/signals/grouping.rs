//! Unit tests for proximity grouping

use confluence_engine::models::{AnalysisKind, CandidatePriceLevel};
use confluence_engine::signals::grouping::{group_levels, grouping_tolerance};

fn level(price: f64, source: AnalysisKind) -> CandidatePriceLevel {
    CandidatePriceLevel {
        price,
        level_type: "test".to_string(),
        confidence: 0.5,
        weighted_confidence: 0.25,
        source,
    }
}

#[test]
fn test_tolerance_scales_with_price() {
    assert!((grouping_tolerance(1.1) - 0.0011).abs() < 1e-12);
    assert!((grouping_tolerance(50_000.0) - 50.0).abs() < 1e-9);
}

#[test]
fn test_empty_input() {
    assert!(group_levels(Vec::new(), 0.001).is_empty());
}

#[test]
fn test_distant_levels_split() {
    let groups = group_levels(
        vec![
            level(1.0011, AnalysisKind::FibonacciLevels),
            level(1.0, AnalysisKind::WaveAnalysis),
        ],
        0.001,
    );
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].avg_price, 1.0);
    assert_eq!(groups[1].avg_price, 1.0011);
}

#[test]
fn test_chained_levels_form_one_group() {
    // Each step is within tolerance of the previous member, the span is not.
    let groups = group_levels(
        vec![
            level(1.0024, AnalysisKind::WaveAnalysis),
            level(1.0, AnalysisKind::FibonacciLevels),
            level(1.0016, AnalysisKind::SupportResistance),
            level(1.0008, AnalysisKind::ChartPattern),
        ],
        0.001,
    );
    assert_eq!(groups.len(), 1);

    let group = &groups[0];
    assert_eq!(group.count(), 4);
    assert_eq!(group.analyses.len(), 4);
    let (low, high) = group.span();
    assert_eq!(low, 1.0);
    assert_eq!(high, 1.0024);
    assert!((group.avg_price - 1.0012).abs() < 1e-12);
}

#[test]
fn test_group_totals() {
    let groups = group_levels(
        vec![
            level(1.1, AnalysisKind::WaveAnalysis),
            level(1.1005, AnalysisKind::WaveAnalysis),
        ],
        0.0011,
    );
    assert_eq!(groups.len(), 1);
    assert!((groups[0].total_confidence - 1.0).abs() < 1e-12);
    assert!((groups[0].total_weighted_confidence - 0.5).abs() < 1e-12);
    // Two levels from one analysis do not make a confluence.
    assert!(!groups[0].is_confluence());
}

#[test]
fn test_groups_are_sorted_by_price() {
    let groups = group_levels(
        vec![
            level(1.3, AnalysisKind::WaveAnalysis),
            level(1.1, AnalysisKind::WaveAnalysis),
            level(1.2, AnalysisKind::WaveAnalysis),
        ],
        0.001,
    );
    let prices: Vec<f64> = groups.iter().map(|g| g.avg_price).collect();
    assert_eq!(prices, vec![1.1, 1.2, 1.3]);
}
