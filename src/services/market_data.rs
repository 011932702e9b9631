//! Market data provider interface and a file-backed implementation.

use crate::error::MarketDataError;
use crate::models::bar::PriceBar;
use crate::models::timeframe::Timeframe;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Most recent `limit` bars for a symbol, oldest first.
    async fn get_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<PriceBar>, MarketDataError>;

    /// Close of the latest bar.
    async fn get_latest_price(
        &self,
        symbol: &str,
        timeframe: Timeframe,
    ) -> Result<f64, MarketDataError> {
        self.get_bars(symbol, timeframe, 1)
            .await?
            .last()
            .map(|bar| bar.close)
            .ok_or_else(|| MarketDataError::NoData(symbol.to_string()))
    }
}

/// Reads a JSON array of bars from disk. The file holds a single series, so
/// symbol and timeframe are not used for lookup.
pub struct JsonFileMarketDataProvider {
    path: PathBuf,
}

impl JsonFileMarketDataProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MarketDataProvider for JsonFileMarketDataProvider {
    async fn get_bars(
        &self,
        symbol: &str,
        _timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let mut bars: Vec<PriceBar> = serde_json::from_str(&raw)?;
        if bars.is_empty() {
            return Err(MarketDataError::NoData(symbol.to_string()));
        }

        bars.sort_by_key(|bar| bar.timestamp);
        let start = bars.len().saturating_sub(limit);
        Ok(bars.split_off(start))
    }
}
