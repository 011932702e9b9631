//! Interfaces of the upstream technical analyzers.
//!
//! The engine only consumes their structured outputs. Wave and chart-pattern
//! analyzers are optional collaborators; Fibonacci levels fall back to
//! [`SwingRetracement`] when no analyzer is registered.

use crate::error::AnalysisError;
use crate::indicators::structure::fibonacci::{calculate_retracements, DEFAULT_SWING_LOOKBACK};
use crate::models::analysis::{FibonacciLevel, FibonacciOutput, PatternOutput, WaveOutput};
use crate::models::bar::PriceBar;
use crate::models::timeframe::Timeframe;
use async_trait::async_trait;

#[async_trait]
pub trait WaveAnalyzer: Send + Sync {
    async fn analyze(&self, bars: &[PriceBar]) -> Result<Option<WaveOutput>, AnalysisError>;
}

#[async_trait]
pub trait ChartPatternDetector: Send + Sync {
    async fn detect_patterns(
        &self,
        bars: &[PriceBar],
        timeframe: Timeframe,
    ) -> Result<Vec<PatternOutput>, AnalysisError>;
}

#[async_trait]
pub trait FibonacciAnalyzer: Send + Sync {
    async fn analyze(&self, bars: &[PriceBar]) -> Result<Option<FibonacciOutput>, AnalysisError>;

    /// Whether this analyzer exposes raw levels through [`compute_levels`](Self::compute_levels)
    /// rather than a full analysis.
    fn supports_levels(&self) -> bool {
        false
    }

    async fn compute_levels(&self, bars: &[PriceBar]) -> Result<Vec<FibonacciLevel>, AnalysisError> {
        Ok(calculate_retracements(bars, DEFAULT_SWING_LOOKBACK))
    }

    /// The output the engine consumes: computed levels when supported,
    /// the full analysis otherwise.
    async fn resolve(&self, bars: &[PriceBar]) -> Result<Option<FibonacciOutput>, AnalysisError> {
        if self.supports_levels() {
            let levels = self.compute_levels(bars).await?;
            Ok(output_from_levels(levels, bars.len()))
        } else {
            self.analyze(bars).await
        }
    }
}

/// Wrap bare levels into an analysis output. Confidence is the mean level strength.
pub fn output_from_levels(levels: Vec<FibonacciLevel>, bar_count: usize) -> Option<FibonacciOutput> {
    if levels.is_empty() {
        return None;
    }

    let confidence = levels.iter().map(|l| l.strength).sum::<f64>() / levels.len() as f64;
    Some(FibonacciOutput {
        confidence: confidence.clamp(0.0, 1.0),
        description: format!(
            "{} Fibonacci levels over the last {} bars",
            levels.len(),
            bar_count.min(DEFAULT_SWING_LOOKBACK)
        ),
        levels,
    })
}

/// A swing needs at least two bars.
pub const MIN_SWING_BARS: usize = 2;

/// Simple swing high/low retracement used when no Fibonacci analyzer is registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwingRetracement;

#[async_trait]
impl FibonacciAnalyzer for SwingRetracement {
    async fn analyze(&self, bars: &[PriceBar]) -> Result<Option<FibonacciOutput>, AnalysisError> {
        if bars.len() < MIN_SWING_BARS {
            return Err(AnalysisError::InsufficientData {
                needed: MIN_SWING_BARS,
                got: bars.len(),
            });
        }
        let levels = calculate_retracements(bars, DEFAULT_SWING_LOOKBACK);
        Ok(output_from_levels(levels, bars.len()))
    }
}
