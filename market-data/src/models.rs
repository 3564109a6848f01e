//! Market data models

use std::fmt;

use common::decimal::precision::{round_percent, round_price};
use common::decimal::{Amount, Price, Quantity};
use common::model::order::Side;
use serde::{Deserialize, Serialize};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// One rung of an order book ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct PriceLevel {
    /// Price
    pub price: Price,
    /// Size available at this price, in base currency
    pub size: Quantity,
}

impl PriceLevel {
    pub fn new(price: Price, size: Quantity) -> Self {
        Self { price, size }
    }
}

impl From<(Price, Quantity)> for PriceLevel {
    fn from((price, size): (Price, Quantity)) -> Self {
        Self { price, size }
    }
}

/// Order book snapshot
///
/// Both sides are best-first: bids by price descending, asks by price
/// ascending. The ordering is the producer's responsibility and is never
/// re-checked here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct OrderBookSnapshot {
    /// Market symbol
    pub symbol: String,
    /// Bid side, best (highest) first
    pub bids: Vec<PriceLevel>,
    /// Ask side, best (lowest) first
    pub asks: Vec<PriceLevel>,
}

impl OrderBookSnapshot {
    /// Ladder consumed by a market order on `side`: buys take asks, sells take bids
    pub fn side_for(&self, side: Side) -> &[PriceLevel] {
        match side {
            Side::Buy => &self.asks,
            Side::Sell => &self.bids,
        }
    }

    /// Highest bid price, 0 when there are no bids
    pub fn best_bid(&self) -> Price {
        self.bids.first().map(|level| level.price).unwrap_or(0.0)
    }

    /// Lowest ask price, 0 when there are no asks
    pub fn best_ask(&self) -> Price {
        self.asks.first().map(|level| level.price).unwrap_or(0.0)
    }

    /// Best ask minus best bid, rounded to price precision.
    ///
    /// Zero when either side is empty.
    pub fn spread(&self) -> Price {
        if self.bids.is_empty() || self.asks.is_empty() {
            return 0.0;
        }
        round_price(self.best_ask() - self.best_bid())
    }

    /// Spread as a percentage of the best bid
    pub fn spread_pct(&self) -> f64 {
        let best_bid = self.best_bid();
        if best_bid <= 0.0 || self.asks.is_empty() {
            return 0.0;
        }
        round_percent((self.best_ask() - best_bid) / best_bid * 100.0)
    }

    /// Copy of the book keeping at most `depth` levels per side
    pub fn truncated(&self, depth: usize) -> Self {
        Self {
            symbol: self.symbol.clone(),
            bids: self.bids.iter().take(depth).copied().collect(),
            asks: self.asks.iter().take(depth).copied().collect(),
        }
    }
}

/// Outcome of walking a ladder for a target amount
///
/// Price-like fields carry 8 decimals, `slippage_pct` carries 4. A result
/// with `depth_used == 0` means nothing could be filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct SlippageResult {
    /// Volume-weighted average execution price
    pub avg_price: Price,
    /// Price of the first level
    pub best_price: Price,
    /// Deviation of the average price from the best price, in percent
    pub slippage_pct: f64,
    /// Base quantity filled
    pub depth_used: Quantity,
    /// Quote amount spent
    pub total_cost: Amount,
}

impl SlippageResult {
    /// Result for an empty book or a non-positive amount
    pub fn zero() -> Self {
        Self::default()
    }

    /// True when nothing was filled
    pub fn is_empty(&self) -> bool {
        self.depth_used == 0.0
    }
}

/// 24h figures needed to synthesise a sparkline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct MarketSnapshot {
    /// Market symbol (e.g., "BTC/USDT")
    pub symbol: String,
    /// Last trade price
    pub last_price: Price,
    /// 24h high price
    pub high_24h: Price,
    /// 24h low price
    pub low_24h: Price,
    /// 24h price change percentage
    pub change_pct_24h: f64,
}

/// Sparkline prices, oldest first; the last element is the current price
pub type SparkSeries = Vec<f64>;

/// Drawing area of a sparkline in SVG user units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct ViewBox {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewBox {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 30.0,
        }
    }
}

/// SVG-ready coordinate strings for a sparkline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct PlotPoints {
    /// Space-separated `x,y` pairs for a `<polyline>`
    pub polyline_points: String,
    /// Polyline closed along the bottom edge for a filled `<polygon>`
    pub polygon_points: String,
}

impl PlotPoints {
    /// No points to draw
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.polyline_points.is_empty()
    }
}

/// Direction of the 24h move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum TrendDirection {
    Positive,
    Negative,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Positive => "positive",
            TrendDirection::Negative => "negative",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slippage estimate for a market order, with the book's spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct SlippageQuote {
    /// Market symbol
    pub symbol: String,
    /// Side of the hypothetical order
    pub side: Side,
    /// Requested amount in base currency
    pub amount: Quantity,
    /// Volume-weighted average execution price
    pub avg_price: Price,
    /// Best price on the consumed side
    pub best_price: Price,
    /// Slippage in percent
    pub slippage_pct: f64,
    /// Best ask minus best bid
    pub spread: Price,
    /// Spread relative to the best bid, in percent
    pub spread_pct: f64,
    /// Base quantity filled
    pub depth_used: Quantity,
    /// Quote amount spent
    pub total_cost: Amount,
}

/// Ticker row with its sparkline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct TickerSparkline {
    /// Market symbol
    pub symbol: String,
    /// Base asset
    pub base: String,
    /// Quote asset
    pub quote: String,
    /// Last trade price
    pub last_price: Price,
    /// 24h price change percentage
    pub change_pct_24h: f64,
    /// 24h high price
    pub high_24h: Price,
    /// 24h low price
    pub low_24h: Price,
    /// 24h volume in quote asset
    pub volume_24h: Quantity,
    /// Best bid reported with the 24h figures
    pub highest_bid: Price,
    /// Best ask reported with the 24h figures
    pub lowest_ask: Price,
    /// Direction of the 24h move
    pub trend: TrendDirection,
    /// Synthetic price history
    pub prices: SparkSeries,
    /// Projected plot coordinates
    #[serde(flatten)]
    pub points: PlotPoints,
}

/// Ordering of a movers list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum MoverMode {
    /// Largest 24h change first
    #[default]
    Gainers,
    /// Smallest 24h change first
    Losers,
}

/// One entry of a gainers or losers list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct MoverRow {
    pub symbol: String,
    pub base: String,
    pub quote: String,
    pub last_price: Price,
    pub change_pct_24h: f64,
    /// 24h volume in quote asset
    pub volume_24h: Quantity,
}

/// Order book level as presented to widgets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct BookLevel {
    pub price: Price,
    pub amount: Quantity,
}

impl From<PriceLevel> for BookLevel {
    fn from(level: PriceLevel) -> Self {
        Self {
            price: level.price,
            amount: level.size,
        }
    }
}

/// Depth-limited order book with its spread
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct OrderBookSummary {
    /// Market symbol in underscore form
    pub symbol: String,
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
    /// Best ask minus best bid
    pub spread: Price,
    /// Spread relative to the best bid, in percent
    pub spread_pct: f64,
}
