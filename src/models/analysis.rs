//! Normalized analysis records and the typed payload of each analysis kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four independent analyses that can agree on a price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisKind {
    WaveAnalysis,
    ChartPattern,
    FibonacciLevels,
    SupportResistance,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 4] = [
        AnalysisKind::WaveAnalysis,
        AnalysisKind::ChartPattern,
        AnalysisKind::FibonacciLevels,
        AnalysisKind::SupportResistance,
    ];

    /// Total number of analysis kinds; the denominator of the diversity score.
    pub const COUNT: usize = Self::ALL.len();

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisKind::WaveAnalysis => "Elliott Wave",
            AnalysisKind::ChartPattern => "Chart Pattern",
            AnalysisKind::FibonacciLevels => "Fibonacci",
            AnalysisKind::SupportResistance => "Support/Resistance",
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveTarget {
    pub price: f64,
    #[serde(rename = "type")]
    pub target_type: String,
}

/// Output of a wave-pattern analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveOutput {
    pub confidence: f64,
    #[serde(default)]
    pub targets: Vec<WaveTarget>,
    #[serde(default)]
    pub description: String,
}

/// One detected chart pattern with its projected target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternOutput {
    pub confidence: f64,
    #[serde(default)]
    pub target: Option<f64>,
    pub pattern_type: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciLevel {
    pub price: f64,
    pub ratio: f64,
    pub strength: f64,
}

/// Output of a Fibonacci analyzer: retracement/extension levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciOutput {
    pub confidence: f64,
    #[serde(default)]
    pub levels: Vec<FibonacciLevel>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelType {
    Support,
    Resistance,
}

impl LevelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelType::Support => "support",
            LevelType::Resistance => "resistance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceLevel {
    pub price: f64,
    pub level_type: LevelType,
    pub strength: f64,
    pub touches: usize,
}

/// Output of the built-in support/resistance analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistanceOutput {
    pub confidence: f64,
    pub levels: Vec<SupportResistanceLevel>,
    pub description: String,
}

/// Kind-specific payload of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum AnalysisPayload {
    Wave(WaveOutput),
    ChartPattern(PatternOutput),
    Fibonacci(FibonacciOutput),
    SupportResistance(SupportResistanceOutput),
}

impl AnalysisPayload {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisPayload::Wave(_) => AnalysisKind::WaveAnalysis,
            AnalysisPayload::ChartPattern(_) => AnalysisKind::ChartPattern,
            AnalysisPayload::Fibonacci(_) => AnalysisKind::FibonacciLevels,
            AnalysisPayload::SupportResistance(_) => AnalysisKind::SupportResistance,
        }
    }
}

/// Uniform record wrapping one analysis output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub kind: AnalysisKind,
    /// Always within `[0, 1]`.
    pub confidence: f64,
    pub payload: AnalysisPayload,
    pub description: String,
}

impl AnalysisResult {
    /// Normalize a raw payload. Confidence is clamped to `[0, 1]`; a
    /// non-finite confidence becomes 0.
    pub fn new(payload: AnalysisPayload) -> Self {
        let (confidence, description) = match &payload {
            AnalysisPayload::Wave(w) => (w.confidence, w.description.clone()),
            AnalysisPayload::ChartPattern(p) => (p.confidence, p.description.clone()),
            AnalysisPayload::Fibonacci(f) => (f.confidence, f.description.clone()),
            AnalysisPayload::SupportResistance(s) => (s.confidence, s.description.clone()),
        };

        Self {
            kind: payload.kind(),
            confidence: normalize_confidence(confidence),
            payload,
            description,
        }
    }
}

pub(crate) fn normalize_confidence(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl From<WaveOutput> for AnalysisResult {
    fn from(output: WaveOutput) -> Self {
        Self::new(AnalysisPayload::Wave(output))
    }
}

impl From<PatternOutput> for AnalysisResult {
    fn from(output: PatternOutput) -> Self {
        Self::new(AnalysisPayload::ChartPattern(output))
    }
}

impl From<FibonacciOutput> for AnalysisResult {
    fn from(output: FibonacciOutput) -> Self {
        Self::new(AnalysisPayload::Fibonacci(output))
    }
}

impl From<SupportResistanceOutput> for AnalysisResult {
    fn from(output: SupportResistanceOutput) -> Self {
        Self::new(AnalysisPayload::SupportResistance(output))
    }
}
