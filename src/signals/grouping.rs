//! Proximity clustering of candidate levels

use crate::models::confluence::{CandidatePriceLevel, ConfluenceGroup};
use std::cmp::Ordering;

/// Clustering tolerance as a fraction of the current price.
pub const GROUPING_TOLERANCE: f64 = 0.001;

pub fn grouping_tolerance(current_price: f64) -> f64 {
    current_price * GROUPING_TOLERANCE
}

/// Cluster levels by price.
///
/// Levels are sorted ascending and walked once; a new group starts whenever
/// the next price is more than `tolerance` above the last level added to the
/// current group. Because the comparison is against the last member, a dense
/// chain of levels forms one group even when its span exceeds `tolerance`.
pub fn group_levels(mut levels: Vec<CandidatePriceLevel>, tolerance: f64) -> Vec<ConfluenceGroup> {
    levels.sort_by(compare_levels);

    let mut groups = Vec::new();
    let mut current: Vec<CandidatePriceLevel> = Vec::new();

    for level in levels {
        if let Some(last) = current.last() {
            if (level.price - last.price).abs() > tolerance {
                groups.push(ConfluenceGroup::from_levels(std::mem::take(&mut current)));
            }
        }
        current.push(level);
    }

    if !current.is_empty() {
        groups.push(ConfluenceGroup::from_levels(current));
    }

    groups
}

// Total order so that equal prices land in the same position regardless of input order.
fn compare_levels(a: &CandidatePriceLevel, b: &CandidatePriceLevel) -> Ordering {
    a.price
        .total_cmp(&b.price)
        .then_with(|| a.source.cmp(&b.source))
        .then_with(|| a.level_type.cmp(&b.level_type))
        .then_with(|| a.confidence.total_cmp(&b.confidence))
        .then_with(|| a.weighted_confidence.total_cmp(&b.weighted_confidence))
}
