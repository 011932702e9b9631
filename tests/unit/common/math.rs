//! Unit tests for numeric helpers

use confluence_engine::common::math::{mean_finite, sma, true_range};

#[test]
fn test_true_range_without_prev_close() {
    assert!((true_range(1.2, 1.1, None) - 0.1).abs() < 1e-12);
}

#[test]
fn test_true_range_with_gap() {
    // Gap up from 1.0: the distance to the prior close dominates.
    assert!((true_range(1.2, 1.1, Some(1.0)) - 0.2).abs() < 1e-12);
    // Gap down to 1.3.
    assert!((true_range(1.2, 1.1, Some(1.3)) - 0.2).abs() < 1e-12);
}

#[test]
fn test_true_range_never_negative() {
    assert!(true_range(1.0, 1.5, None) >= 0.0);
    assert!(true_range(1.0, 1.5, Some(1.2)) >= 0.0);
}

#[test]
fn test_sma() {
    let values = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(sma(&values, 2), Some(3.5));
    assert_eq!(sma(&values, 4), Some(2.5));
    assert_eq!(sma(&values, 5), None);
    assert_eq!(sma(&values, 0), None);
}

#[test]
fn test_sma_rejects_non_finite_window() {
    let values = [f64::NAN, 2.0, 4.0];
    assert_eq!(sma(&values, 3), None);
    assert_eq!(sma(&values, 2), Some(3.0));
}

#[test]
fn test_mean_finite_skips_nan() {
    assert_eq!(mean_finite([1.0, f64::NAN, 3.0]), Some(2.0));
    assert_eq!(mean_finite(Vec::<f64>::new()), None);
    assert_eq!(mean_finite([f64::INFINITY]), None);
}
