//! Candidate price level extraction from normalized analysis results

use crate::config::AnalysisWeights;
use crate::models::analysis::{AnalysisKind, AnalysisPayload, AnalysisResult};
use crate::models::confluence::CandidatePriceLevel;

/// Fibonacci levels further than this fraction from the current price are not actionable.
pub const FIBONACCI_MAX_DISTANCE: f64 = 0.05;

/// Pull candidate levels out of one analysis result.
///
/// Malformed entries (non-finite or non-positive prices, missing pattern
/// targets) are skipped rather than reported.
pub fn extract_levels(
    analysis: &AnalysisResult,
    current_price: f64,
    weights: &AnalysisWeights,
) -> Vec<CandidatePriceLevel> {
    let kind = analysis.kind;
    let confidence = analysis.confidence;

    let raw: Vec<(f64, String, f64)> = match &analysis.payload {
        AnalysisPayload::Wave(wave) => wave
            .targets
            .iter()
            .map(|t| (t.price, format!("elliott_{}", t.target_type), confidence))
            .collect(),
        AnalysisPayload::ChartPattern(pattern) => pattern
            .target
            .map(|target| (target, format!("pattern_{}", pattern.pattern_type), confidence))
            .into_iter()
            .collect(),
        AnalysisPayload::Fibonacci(fib) => fib
            .levels
            .iter()
            .filter(|l| is_near(l.price, current_price))
            .map(|l| (l.price, format!("fib_{}", l.ratio), confidence * l.strength))
            .collect(),
        AnalysisPayload::SupportResistance(sr) => sr
            .levels
            .iter()
            .map(|l| {
                (
                    l.price,
                    format!("sr_{}", l.level_type.as_str()),
                    confidence * l.strength,
                )
            })
            .collect(),
    };

    raw.into_iter()
        .filter(|(price, _, level_confidence)| {
            price.is_finite() && *price > 0.0 && level_confidence.is_finite()
        })
        .map(|(price, level_type, level_confidence)| {
            candidate(kind, price, level_type, level_confidence, weights)
        })
        .collect()
}

/// Extract and concatenate candidates from every result.
pub fn extract_all_levels(
    analyses: &[AnalysisResult],
    current_price: f64,
    weights: &AnalysisWeights,
) -> Vec<CandidatePriceLevel> {
    analyses
        .iter()
        .flat_map(|analysis| extract_levels(analysis, current_price, weights))
        .collect()
}

fn candidate(
    source: AnalysisKind,
    price: f64,
    level_type: String,
    confidence: f64,
    weights: &AnalysisWeights,
) -> CandidatePriceLevel {
    CandidatePriceLevel {
        price,
        level_type,
        confidence,
        weighted_confidence: confidence * weights.get(source),
        source,
    }
}

fn is_near(price: f64, current_price: f64) -> bool {
    ((price - current_price).abs() / current_price) < FIBONACCI_MAX_DISTANCE
}
