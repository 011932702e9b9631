use serde::Serialize;
use thiserror::Error;

/// Failure of a single analysis. Never fatal to a run: the analysis simply
/// contributes no levels.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum AnalysisError {
    #[error("analysis failed: {0}")]
    Failed(String),

    #[error("analysis panicked: {0}")]
    Panicked(String),

    #[error("insufficient data: needed {needed} bars, got {got}")]
    InsufficientData { needed: usize, got: usize },
}

/// Invalid caller-supplied configuration.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ConfigError {
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("invalid timeframe: {0}")]
    InvalidTimeframe(String),
}

/// Failure of a whole per-symbol evaluation. Surfaced as "no signal", never
/// propagated past the engine.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum EngineError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("current price is not a positive finite number: {0}")]
    InvalidPrice(f64),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("evaluation panicked: {0}")]
    Panicked(String),
}

/// Errors raised while loading bars from a market data source.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("failed to read market data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode market data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no bars available for {0}")]
    NoData(String),
}
