//! Shared bar builders and analyzer stubs for the test crates.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use confluence_engine::analyzers::{ChartPatternDetector, FibonacciAnalyzer, WaveAnalyzer};
use confluence_engine::error::AnalysisError;
use confluence_engine::models::{
    FibonacciLevel, FibonacciOutput, PatternOutput, PriceBar, Timeframe, WaveOutput, WaveTarget,
};

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn bar(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> PriceBar {
    PriceBar::new(open, high, low, close, volume, base_time() + Duration::hours(i as i64))
}

/// Bars with open == close == `price` and a range of `2 × half_range`.
pub fn flat_bars(count: usize, price: f64, half_range: f64) -> Vec<PriceBar> {
    (0..count)
        .map(|i| bar(i, price, price + half_range, price - half_range, price, 1000.0))
        .collect()
}

/// Closes follow `mid + amplitude × sin(2πi / period)`, each bar spanning ±0.0005.
pub fn sine_bars(count: usize, mid: f64, amplitude: f64, period: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let phase = 2.0 * std::f64::consts::PI * i as f64 / period as f64;
            let close = mid + amplitude * phase.sin();
            bar(i, close, close + 0.0005, close - 0.0005, close, 1000.0)
        })
        .collect()
}

pub fn wave_output(confidence: f64, targets: &[(f64, &str)]) -> WaveOutput {
    WaveOutput {
        confidence,
        targets: targets
            .iter()
            .map(|&(price, target_type)| WaveTarget {
                price,
                target_type: target_type.to_string(),
            })
            .collect(),
        description: "Impulse wave in progress".to_string(),
    }
}

pub fn fibonacci_output(confidence: f64, levels: &[(f64, f64, f64)]) -> FibonacciOutput {
    FibonacciOutput {
        confidence,
        levels: levels
            .iter()
            .map(|&(price, ratio, strength)| FibonacciLevel {
                price,
                ratio,
                strength,
            })
            .collect(),
        description: "Retracement of the last swing".to_string(),
    }
}

pub struct StubWave(pub Option<WaveOutput>);

#[async_trait]
impl WaveAnalyzer for StubWave {
    async fn analyze(&self, _bars: &[PriceBar]) -> Result<Option<WaveOutput>, AnalysisError> {
        Ok(self.0.clone())
    }
}

pub struct PanickingWave;

#[async_trait]
impl WaveAnalyzer for PanickingWave {
    async fn analyze(&self, _bars: &[PriceBar]) -> Result<Option<WaveOutput>, AnalysisError> {
        panic!("wave count diverged")
    }
}

pub struct StubPatterns(pub Vec<PatternOutput>);

#[async_trait]
impl ChartPatternDetector for StubPatterns {
    async fn detect_patterns(
        &self,
        _bars: &[PriceBar],
        _timeframe: Timeframe,
    ) -> Result<Vec<PatternOutput>, AnalysisError> {
        Ok(self.0.clone())
    }
}

pub struct FailingPatterns;

#[async_trait]
impl ChartPatternDetector for FailingPatterns {
    async fn detect_patterns(
        &self,
        _bars: &[PriceBar],
        _timeframe: Timeframe,
    ) -> Result<Vec<PatternOutput>, AnalysisError> {
        Err(AnalysisError::Failed("pattern model unavailable".to_string()))
    }
}

pub struct StubFibonacci(pub Option<FibonacciOutput>);

#[async_trait]
impl FibonacciAnalyzer for StubFibonacci {
    async fn analyze(&self, _bars: &[PriceBar]) -> Result<Option<FibonacciOutput>, AnalysisError> {
        Ok(self.0.clone())
    }
}

/// Exposes only raw levels; its full analysis yields nothing.
pub struct LevelsOnlyFibonacci(pub Vec<FibonacciLevel>);

#[async_trait]
impl FibonacciAnalyzer for LevelsOnlyFibonacci {
    async fn analyze(&self, _bars: &[PriceBar]) -> Result<Option<FibonacciOutput>, AnalysisError> {
        Ok(None)
    }

    fn supports_levels(&self) -> bool {
        true
    }

    async fn compute_levels(&self, _bars: &[PriceBar]) -> Result<Vec<FibonacciLevel>, AnalysisError> {
        Ok(self.0.clone())
    }
}
