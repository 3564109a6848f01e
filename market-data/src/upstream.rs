//! Exchange payload mapping
//!
//! The exchange serves numbers as JSON strings (`["68900.12", "0.5"]`) and
//! names its 24h fields in camelCase with odd suffixes (`highestPrice24H`).
//! These types accept either strings or numbers and convert into the core's
//! inputs.

use common::decimal::{Price, Quantity};
use common::error::{Error, ErrorExt, Result};
use serde::{Deserialize, Deserializer};

use crate::models::{MarketSnapshot, OrderBookSnapshot, PriceLevel};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Reject values `f64` parsing accepts but no exchange sends (`NaN`, `inf`)
fn finite<E: serde::de::Error>(value: f64) -> std::result::Result<f64, E> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(E::custom(format!("non-finite number {}", value)))
    }
}

fn parse_text<E: serde::de::Error>(text: &str) -> std::result::Result<f64, E> {
    text.trim().parse().map_err(E::custom).and_then(finite)
}

/// Deserialize a finite number that may be sent as a string
fn de_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => finite(n),
        NumberOrString::Text(s) => parse_text(&s),
    }
}

/// Like [`de_number`], but absent values read as `None`
fn de_optional_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => finite(n).map(Some),
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(s)) => parse_text(&s).map(Some),
    }
}

/// Like [`de_number`], but null and empty strings read as zero
fn de_number_or_zero<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_optional_number(deserializer)?.unwrap_or(0.0))
}

/// Order book level as sent by the exchange: `[price, size]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RawLevel(
    #[serde(deserialize_with = "de_number")] pub Price,
    #[serde(deserialize_with = "de_number")] pub Quantity,
);

impl From<RawLevel> for PriceLevel {
    fn from(RawLevel(price, size): RawLevel) -> Self {
        PriceLevel { price, size }
    }
}

/// Order book payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawOrderBook {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub bids: Vec<RawLevel>,
    #[serde(default)]
    pub asks: Vec<RawLevel>,
}

impl RawOrderBook {
    /// Convert into a snapshot, preferring the payload's own symbol
    pub fn into_snapshot(self, fallback_symbol: &str) -> OrderBookSnapshot {
        OrderBookSnapshot {
            symbol: self.symbol.unwrap_or_else(|| fallback_symbol.to_string()),
            bids: self.bids.into_iter().map(PriceLevel::from).collect(),
            asks: self.asks.into_iter().map(PriceLevel::from).collect(),
        }
    }
}

/// Parse an order book response body
pub fn parse_order_book(body: &str, symbol: &str) -> Result<OrderBookSnapshot> {
    let raw: RawOrderBook = serde_json::from_str(body)
        .map_err(Error::from)
        .with_context(|| format!("order book for {}", symbol))?;
    Ok(raw.into_snapshot(symbol))
}

/// One entry of the exchange's 24h statistics list
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TickerStats {
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "lastPrice", default, deserialize_with = "de_number_or_zero")]
    pub last_price: Price,
    #[serde(rename = "highestPrice24H", default, deserialize_with = "de_number_or_zero")]
    pub high_24h: Price,
    #[serde(rename = "lowestPrice24H", default, deserialize_with = "de_number_or_zero")]
    pub low_24h: Price,
    /// `None` when the exchange has no change figure for the market
    #[serde(rename = "priceChangePercent24H", default, deserialize_with = "de_optional_number")]
    pub change_pct_24h: Option<f64>,
    #[serde(rename = "quoteVolume", default, deserialize_with = "de_number_or_zero")]
    pub quote_volume: Quantity,
    #[serde(rename = "highestBid", default, deserialize_with = "de_number_or_zero")]
    pub highest_bid: Price,
    #[serde(rename = "lowestAsk", default, deserialize_with = "de_number_or_zero")]
    pub lowest_ask: Price,
}

impl TickerStats {
    /// 24h change, zero when absent
    pub fn change_pct(&self) -> f64 {
        self.change_pct_24h.unwrap_or(0.0)
    }

    /// Fields the sparkline generator needs
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            symbol: self.symbol.clone(),
            last_price: self.last_price,
            high_24h: self.high_24h,
            low_24h: self.low_24h,
            change_pct_24h: self.change_pct(),
        }
    }
}

/// Parse a 24h statistics response body
pub fn parse_ticker_stats(body: &str) -> Result<Vec<TickerStats>> {
    serde_json::from_str(body)
        .map_err(Error::from)
        .with_context(|| "ticker statistics")
}

/// Split a comma-separated symbol list, dropping blanks
pub fn parse_symbol_list(symbols: &str) -> Vec<String> {
    symbols
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keep the stats whose symbol is requested, in upstream order
pub fn select_symbols<'a, S: AsRef<str>>(stats: &'a [TickerStats], symbols: &[S]) -> Vec<&'a TickerStats> {
    stats
        .iter()
        .filter(|item| symbols.iter().any(|s| s.as_ref() == item.symbol))
        .collect()
}
