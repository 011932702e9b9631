//! Confluence detection and signal generation.
//!
//! Several independent technical analyses each propose price levels; levels
//! that sit close together are clustered, scored, and the strongest cluster
//! becomes a trade signal with entry, stop-loss and take-profit.

pub mod analyzers;
pub mod common;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use config::{AnalysisConfig, AnalysisWeights};
pub use error::{AnalysisError, ConfigError, EngineError, MarketDataError};
pub use models::{AnalysisKind, AnalysisResult, PriceBar, Signal, SignalDirection, Timeframe};
pub use signals::engine::{ConfluenceEngine, Evaluation, NoSignalReason, Verdict};
