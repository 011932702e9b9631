//! Boundaries to external collaborators.

pub mod market_data;

pub use market_data::{JsonFileMarketDataProvider, MarketDataProvider};
