//! Confluence Analyzer
//!
//! Evaluates one symbol from a JSON file of bars and prints the evaluation
//! as JSON.
//!
//! Usage: analyze <bars.json> <symbol> [timeframe] [config.json]

use anyhow::{bail, Context};
use confluence_engine::config::{get_environment, AnalysisConfig};
use confluence_engine::logging;
use confluence_engine::models::Timeframe;
use confluence_engine::services::{JsonFileMarketDataProvider, MarketDataProvider};
use confluence_engine::ConfluenceEngine;
use dotenvy::dotenv;
use std::env;
use tracing::info;

const DEFAULT_BAR_LIMIT: usize = 500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let (bars_path, symbol) = match args.as_slice() {
        [bars_path, symbol, ..] => (bars_path.clone(), symbol.clone()),
        _ => bail!("usage: analyze <bars.json> <symbol> [timeframe] [config.json]"),
    };

    let config = match args.get(3) {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => AnalysisConfig::default(),
    };
    let timeframe_arg = args.get(2).cloned().unwrap_or_else(|| config.timeframe.clone());
    let timeframe = Timeframe::parse(&timeframe_arg)?;

    let limit: usize = env::var("BAR_LIMIT")
        .ok()
        .and_then(|l| l.parse().ok())
        .unwrap_or(DEFAULT_BAR_LIMIT);

    info!(environment = %get_environment(), "Starting confluence analyzer");
    info!(
        symbol = %symbol,
        timeframe = %timeframe,
        threshold = config.confluence_threshold,
        "Analyzing {} on {}",
        symbol,
        timeframe
    );

    let provider = JsonFileMarketDataProvider::new(&bars_path);
    let bars = provider
        .get_bars(&symbol, timeframe, limit)
        .await
        .with_context(|| format!("failed to load bars from {}", bars_path))?;

    let engine = ConfluenceEngine::new();
    let evaluation = engine
        .analyze_symbol(&symbol, timeframe.as_str(), &bars, Some(&config))
        .await;

    println!("{}", serde_json::to_string_pretty(&evaluation)?);
    Ok(())
}
