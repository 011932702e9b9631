use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bar interval the analysis runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
}

impl Timeframe {
    /// Parse a timeframe label, accepting common aliases (`1h`, `60m`, `d1`, ...).
    /// Blank input maps to `H1`.
    pub fn parse(raw: &str) -> Result<Timeframe, ConfigError> {
        let cleaned = raw.trim();
        if cleaned.is_empty() {
            return Ok(Timeframe::H1);
        }

        let timeframe = match cleaned.to_ascii_lowercase().as_str() {
            "m1" | "1m" => Timeframe::M1,
            "m5" | "5m" => Timeframe::M5,
            "m15" | "15m" => Timeframe::M15,
            "m30" | "30m" => Timeframe::M30,
            "h1" | "1h" | "60m" => Timeframe::H1,
            "h4" | "4h" => Timeframe::H4,
            "d1" | "1d" => Timeframe::D1,
            "w1" | "1w" => Timeframe::W1,
            _ => return Err(ConfigError::InvalidTimeframe(cleaned.to_string())),
        };
        Ok(timeframe)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M1 => "M1",
            Timeframe::M5 => "M5",
            Timeframe::M15 => "M15",
            Timeframe::M30 => "M30",
            Timeframe::H1 => "H1",
            Timeframe::H4 => "H4",
            Timeframe::D1 => "D1",
            Timeframe::W1 => "W1",
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::H1
    }
}

impl FromStr for Timeframe {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::parse(s)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
