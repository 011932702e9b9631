//! Confluence strength scoring

use crate::models::analysis::AnalysisKind;
use crate::models::confluence::{ConfluenceGroup, ConfluencePoint};

const DIVERSITY_WEIGHT: f64 = 0.4;
const CONFIDENCE_WEIGHT: f64 = 0.6;
const COUNT_BONUS_DIVISOR: f64 = 5.0;
const MAX_COUNT_BONUS: f64 = 0.2;

/// Share of all analysis kinds represented in the group, capped at 1.
pub fn diversity_score(distinct_kinds: usize) -> f64 {
    (distinct_kinds as f64 / AnalysisKind::COUNT as f64).min(1.0)
}

/// Small bonus for groups with many members, capped at 0.2.
pub fn count_bonus(count: usize) -> f64 {
    (count as f64 / COUNT_BONUS_DIVISOR).min(MAX_COUNT_BONUS)
}

/// Strength of a group in `[0, 1]`:
/// `diversity × 0.4 + avg weighted confidence × 0.6 + count bonus`.
pub fn confluence_strength(group: &ConfluenceGroup) -> f64 {
    if group.levels.is_empty() {
        return 0.0;
    }

    let diversity = diversity_score(group.analyses.len());
    let avg_weighted_confidence = group.total_weighted_confidence / group.count() as f64;
    let strength = diversity * DIVERSITY_WEIGHT
        + avg_weighted_confidence * CONFIDENCE_WEIGHT
        + count_bonus(group.count());

    if strength.is_finite() {
        strength.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Human-readable summary naming the agreeing analyses.
pub fn describe_confluence(group: &ConfluenceGroup) -> String {
    let labels: Vec<&str> = group.analyses.iter().map(|kind| kind.label()).collect();
    let price = group.avg_price;

    match labels.as_slice() {
        [first, second] => format!("Confluence between {first} and {second} at {price:.5}"),
        [first, second, rest @ ..] => format!(
            "Multiple confluence ({first}, {second} and {} more) at {price:.5}",
            rest.len()
        ),
        _ => format!("Levels from {} at {price:.5}", labels.join(", ")),
    }
}

/// Score every group on which at least two analysis kinds agree, strongest first.
///
/// Groups backed by a single kind are not confluences and are never scored.
pub fn detect_confluences(groups: &[ConfluenceGroup]) -> Vec<ConfluencePoint> {
    let mut points: Vec<ConfluencePoint> = groups
        .iter()
        .filter(|group| group.is_confluence())
        .map(|group| ConfluencePoint {
            price_level: group.avg_price,
            strength: confluence_strength(group),
            analyses: group.analyses.iter().copied().collect(),
            description: describe_confluence(group),
        })
        .collect();

    points.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    points
}
