//! Trading pair model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Trading pair, e.g. BTC/USDT
///
/// The exchange uses the slash form for tickers and the underscore form
/// (`BTC_USDT`) for order book endpoints; both parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct TradingPair {
    /// Base asset (e.g., "BTC")
    pub base: String,
    /// Quote asset (e.g., "USDT")
    pub quote: String,
}

impl TradingPair {
    /// Create a pair from its assets
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Underscore form used by order book endpoints
    pub fn underscore(&self) -> String {
        format!("{}_{}", self.base, self.quote)
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for TradingPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (base, quote) = s
            .split_once('/')
            .or_else(|| s.split_once('_'))
            .ok_or_else(|| Error::InvalidSymbol(s.to_string()))?;

        let (base, quote) = (base.trim(), quote.trim());
        if base.is_empty() || quote.is_empty() {
            return Err(Error::InvalidSymbol(s.to_string()));
        }

        Ok(Self::new(base, quote))
    }
}
