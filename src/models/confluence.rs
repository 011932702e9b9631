//! Intermediate records of the confluence pipeline: candidate levels, their
//! proximity groups, and the scored confluence points derived from them.

use crate::models::analysis::AnalysisKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A price level proposed by one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePriceLevel {
    pub price: f64,
    /// Subtype tag such as `fib_0.618` or `sr_resistance`.
    pub level_type: String,
    pub confidence: f64,
    /// `confidence` times the configured weight of `source`.
    pub weighted_confidence: f64,
    pub source: AnalysisKind,
}

/// Candidate levels clustered by price proximity.
///
/// Members are chained: each is within tolerance of its neighbour in price
/// order, so the span of a group may exceed the tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfluenceGroup {
    pub avg_price: f64,
    pub total_confidence: f64,
    pub total_weighted_confidence: f64,
    pub analyses: BTreeSet<AnalysisKind>,
    pub levels: Vec<CandidatePriceLevel>,
}

impl ConfluenceGroup {
    pub fn from_levels(levels: Vec<CandidatePriceLevel>) -> Self {
        let count = levels.len().max(1) as f64;
        let avg_price = levels.iter().map(|l| l.price).sum::<f64>() / count;
        let total_confidence = levels.iter().map(|l| l.confidence).sum();
        let total_weighted_confidence = levels.iter().map(|l| l.weighted_confidence).sum();
        let analyses = levels.iter().map(|l| l.source).collect();

        Self {
            avg_price,
            total_confidence,
            total_weighted_confidence,
            analyses,
            levels,
        }
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    /// Lowest and highest member price.
    pub fn span(&self) -> (f64, f64) {
        let low = self.levels.first().map(|l| l.price).unwrap_or(self.avg_price);
        let high = self.levels.last().map(|l| l.price).unwrap_or(self.avg_price);
        (low, high)
    }

    /// At least two distinct analysis kinds agree.
    pub fn is_confluence(&self) -> bool {
        self.analyses.len() >= 2
    }
}

/// A scored group on which at least two analyses agree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfluencePoint {
    pub price_level: f64,
    /// Within `[0, 1]`.
    pub strength: f64,
    pub analyses: Vec<AnalysisKind>,
    pub description: String,
}
