//! Confluence engine: runs every enabled analysis and turns their agreement
//! on a price level into at most one signal.

use crate::analyzers::{ChartPatternDetector, FibonacciAnalyzer, SwingRetracement, WaveAnalyzer};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, EngineError};
use crate::indicators::structure::extrema::DEFAULT_EXTREMA_ORDER;
use crate::indicators::structure::support_resistance::calculate_support_resistance;
use crate::models::analysis::{AnalysisKind, AnalysisResult};
use crate::models::bar::{current_price, PriceBar};
use crate::models::confluence::ConfluencePoint;
use crate::models::signal::Signal;
use crate::models::timeframe::Timeframe;
use crate::signals::decision::StopLossTakeProfit;
use crate::signals::grouping::{group_levels, grouping_tolerance};
use crate::signals::levels::extract_all_levels;
use crate::signals::scoring::detect_confluences;
use futures_util::future::{join_all, BoxFuture};
use futures_util::FutureExt;
use serde::Serialize;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Result of one analysis: its normalized records, or why it produced none.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub kind: AnalysisKind,
    pub result: Result<Vec<AnalysisResult>, AnalysisError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum NoSignalReason {
    NoAnalyses,
    NoCandidateLevels,
    NoConfluence,
    BelowThreshold { strength: f64, threshold: f64 },
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "verdict", content = "value", rename_all = "snake_case")]
pub enum Verdict {
    Signal(Signal),
    NoSignal(NoSignalReason),
}

/// Everything one evaluation produced, kept for audit and display.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub symbol: String,
    pub timeframe: String,
    pub verdict: Verdict,
    /// One entry per analysis that ran, in a fixed kind order.
    pub outcomes: Vec<AnalysisOutcome>,
    /// Qualifying confluences, strongest first.
    pub confluences: Vec<ConfluencePoint>,
}

impl Evaluation {
    fn empty(symbol: &str, timeframe: String, reason: NoSignalReason) -> Self {
        Self {
            symbol: symbol.to_string(),
            timeframe,
            verdict: Verdict::NoSignal(reason),
            outcomes: Vec::new(),
            confluences: Vec::new(),
        }
    }

    pub fn signal(&self) -> Option<&Signal> {
        match &self.verdict {
            Verdict::Signal(signal) => Some(signal),
            Verdict::NoSignal(_) => None,
        }
    }

    pub fn into_signal(self) -> Option<Signal> {
        match self.verdict {
            Verdict::Signal(signal) => Some(signal),
            Verdict::NoSignal(_) => None,
        }
    }

    pub fn no_signal_reason(&self) -> Option<&NoSignalReason> {
        match &self.verdict {
            Verdict::NoSignal(reason) => Some(reason),
            Verdict::Signal(_) => None,
        }
    }

    /// Results of every analysis that succeeded.
    pub fn analyses(&self) -> Vec<&AnalysisResult> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flatten()
            .collect()
    }

    /// Analyses that failed, with their reason.
    pub fn failures(&self) -> Vec<(AnalysisKind, &AnalysisError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.kind, e)))
            .collect()
    }

    pub fn best_confluence(&self) -> Option<&ConfluencePoint> {
        self.confluences.first()
    }
}

/// Orchestrates the analyses and the confluence pipeline.
///
/// Holds no per-call state, so one engine can serve concurrent evaluations
/// for different symbols.
pub struct ConfluenceEngine {
    wave_analyzer: Option<Arc<dyn WaveAnalyzer>>,
    pattern_detector: Option<Arc<dyn ChartPatternDetector>>,
    fibonacci_analyzer: Arc<dyn FibonacciAnalyzer>,
    extrema_order: usize,
}

impl Default for ConfluenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfluenceEngine {
    /// Engine with the built-in support/resistance analysis and swing
    /// retracement Fibonacci levels only.
    pub fn new() -> Self {
        Self {
            wave_analyzer: None,
            pattern_detector: None,
            fibonacci_analyzer: Arc::new(SwingRetracement),
            extrema_order: DEFAULT_EXTREMA_ORDER,
        }
    }

    pub fn with_wave_analyzer(mut self, analyzer: impl WaveAnalyzer + 'static) -> Self {
        self.wave_analyzer = Some(Arc::new(analyzer));
        self
    }

    pub fn with_pattern_detector(mut self, detector: impl ChartPatternDetector + 'static) -> Self {
        self.pattern_detector = Some(Arc::new(detector));
        self
    }

    pub fn with_fibonacci_analyzer(mut self, analyzer: impl FibonacciAnalyzer + 'static) -> Self {
        self.fibonacci_analyzer = Arc::new(analyzer);
        self
    }

    pub fn with_extrema_order(mut self, order: usize) -> Self {
        self.extrema_order = order;
        self
    }

    /// Evaluate one symbol. Never fails: any error or panic is logged and
    /// reported as [`NoSignalReason::Failed`].
    pub async fn analyze_symbol(
        &self,
        symbol: &str,
        timeframe: &str,
        bars: &[PriceBar],
        config: Option<&AnalysisConfig>,
    ) -> Evaluation {
        info!(symbol = %symbol, timeframe = %timeframe, bars = bars.len(), "analyzing symbol");

        let result = AssertUnwindSafe(self.evaluate(symbol, timeframe, bars, config))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(EngineError::Panicked(panic_message(panic.as_ref()))));

        match result {
            Ok(evaluation) => evaluation,
            Err(e) => {
                error!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    error = %e,
                    "evaluation failed for {}, no signal produced",
                    symbol
                );
                Evaluation::empty(symbol, timeframe.to_string(), NoSignalReason::Failed(e.to_string()))
            }
        }
    }

    async fn evaluate(
        &self,
        symbol: &str,
        timeframe: &str,
        bars: &[PriceBar],
        config: Option<&AnalysisConfig>,
    ) -> Result<Evaluation, EngineError> {
        let config = AnalysisConfig::resolve(config)?;
        let timeframe = Timeframe::parse(timeframe)?;
        let current_price = current_price(bars).ok_or(EngineError::EmptySeries)?;
        if !(current_price.is_finite() && current_price > 0.0) {
            return Err(EngineError::InvalidPrice(current_price));
        }

        let outcomes = self.run_analyses(bars, timeframe, &config).await;
        let analyses: Vec<AnalysisResult> = outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flatten()
            .cloned()
            .collect();

        let mut evaluation = Evaluation::empty(symbol, timeframe.to_string(), NoSignalReason::NoAnalyses);
        evaluation.outcomes = outcomes;

        if analyses.is_empty() {
            info!(symbol = %symbol, "no valid analyses for {}", symbol);
            return Ok(evaluation);
        }

        let candidates = extract_all_levels(&analyses, current_price, &config.weights);
        if candidates.is_empty() {
            info!(symbol = %symbol, analyses = analyses.len(), "no candidate price levels for {}", symbol);
            evaluation.verdict = Verdict::NoSignal(NoSignalReason::NoCandidateLevels);
            return Ok(evaluation);
        }

        let candidate_count = candidates.len();
        let groups = group_levels(candidates, grouping_tolerance(current_price));
        evaluation.confluences = detect_confluences(&groups);
        debug!(
            symbol = %symbol,
            candidates = candidate_count,
            groups = groups.len(),
            confluences = evaluation.confluences.len(),
            "grouped candidate levels"
        );

        let Some(best) = evaluation.confluences.first().cloned() else {
            info!(symbol = %symbol, "no confluence detected for {}", symbol);
            evaluation.verdict = Verdict::NoSignal(NoSignalReason::NoConfluence);
            return Ok(evaluation);
        };

        if best.strength < config.confluence_threshold {
            info!(
                symbol = %symbol,
                strength = best.strength,
                threshold = config.confluence_threshold,
                "insufficient confluence for {}: {:.2}",
                symbol,
                best.strength
            );
            evaluation.verdict = Verdict::NoSignal(NoSignalReason::BelowThreshold {
                strength: best.strength,
                threshold: config.confluence_threshold,
            });
            return Ok(evaluation);
        }

        let signal = StopLossTakeProfit::build_signal(
            symbol,
            timeframe,
            bars,
            current_price,
            &best,
            analyses,
            &config,
        );
        info!(
            symbol = %symbol,
            direction = ?signal.direction,
            confluence = signal.confluence_score,
            entry = signal.entry_price,
            stop_loss = ?signal.stop_loss,
            take_profit = ?signal.take_profit,
            "signal generated for {}: {:?} with confluence {:.2}",
            symbol,
            signal.direction,
            signal.confluence_score
        );
        evaluation.verdict = Verdict::Signal(signal);
        Ok(evaluation)
    }

    /// Run the enabled analyses concurrently. Output order follows
    /// [`AnalysisKind::ALL`], independent of completion order.
    async fn run_analyses(
        &self,
        bars: &[PriceBar],
        timeframe: Timeframe,
        config: &AnalysisConfig,
    ) -> Vec<AnalysisOutcome> {
        let mut tasks: Vec<BoxFuture<'_, AnalysisOutcome>> = Vec::new();

        for kind in AnalysisKind::ALL {
            if !config.is_enabled(kind) {
                debug!(analysis = %kind, "analysis disabled");
                continue;
            }

            let task = match kind {
                AnalysisKind::WaveAnalysis => self
                    .wave_analyzer
                    .as_deref()
                    .map(|analyzer| guarded(kind, run_wave(analyzer, bars)).boxed()),
                AnalysisKind::ChartPattern => self
                    .pattern_detector
                    .as_deref()
                    .map(|detector| guarded(kind, run_patterns(detector, bars, timeframe)).boxed()),
                AnalysisKind::FibonacciLevels => Some(
                    guarded(kind, run_fibonacci(self.fibonacci_analyzer.as_ref(), bars)).boxed(),
                ),
                AnalysisKind::SupportResistance => Some(
                    guarded(kind, run_support_resistance(bars, self.extrema_order)).boxed(),
                ),
            };

            match task {
                Some(task) => tasks.push(task),
                None => debug!(analysis = %kind, "no analyzer registered"),
            }
        }

        join_all(tasks).await
    }
}

async fn run_wave(
    analyzer: &dyn WaveAnalyzer,
    bars: &[PriceBar],
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    Ok(analyzer
        .analyze(bars)
        .await?
        .map(AnalysisResult::from)
        .into_iter()
        .collect())
}

async fn run_patterns(
    detector: &dyn ChartPatternDetector,
    bars: &[PriceBar],
    timeframe: Timeframe,
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    Ok(detector
        .detect_patterns(bars, timeframe)
        .await?
        .into_iter()
        .map(AnalysisResult::from)
        .collect())
}

async fn run_fibonacci(
    analyzer: &dyn FibonacciAnalyzer,
    bars: &[PriceBar],
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    Ok(analyzer
        .resolve(bars)
        .await?
        .map(AnalysisResult::from)
        .into_iter()
        .collect())
}

async fn run_support_resistance(
    bars: &[PriceBar],
    order: usize,
) -> Result<Vec<AnalysisResult>, AnalysisError> {
    Ok(calculate_support_resistance(bars, order)
        .map(AnalysisResult::from)
        .into_iter()
        .collect())
}

/// Run one analysis, converting a panic into a failure so it never aborts the others.
async fn guarded<F>(kind: AnalysisKind, analysis: F) -> AnalysisOutcome
where
    F: Future<Output = Result<Vec<AnalysisResult>, AnalysisError>>,
{
    let result = AssertUnwindSafe(analysis)
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(AnalysisError::Panicked(panic_message(panic.as_ref()))));

    match &result {
        Ok(results) => debug!(analysis = %kind, results = results.len(), "analysis completed"),
        Err(e) => warn!(analysis = %kind, error = %e, "{} analysis failed, continuing without it", kind),
    }

    AnalysisOutcome { kind, result }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
