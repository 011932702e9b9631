//! Shared data models spanning the engine layers.

pub mod analysis;
pub mod bar;
pub mod confluence;
pub mod signal;
pub mod timeframe;

pub use analysis::{
    AnalysisKind, AnalysisPayload, AnalysisResult, FibonacciLevel, FibonacciOutput, LevelType,
    PatternOutput, SupportResistanceLevel, SupportResistanceOutput, WaveOutput, WaveTarget,
};
pub use bar::PriceBar;
pub use confluence::{CandidatePriceLevel, ConfluenceGroup, ConfluencePoint};
pub use signal::{Signal, SignalDirection, SIGNAL_PROVENANCE};
pub use timeframe::Timeframe;
