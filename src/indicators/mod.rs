//! Numeric building blocks computed directly from price bars.

pub mod structure;
pub mod volatility;
