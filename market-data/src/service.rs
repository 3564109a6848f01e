//! Market data service implementation

use common::decimal::Quantity;
use common::error::Result;
use common::model::market::TradingPair;
use common::model::order::Side;
use tracing::{debug, warn};

use crate::models::{
    BookLevel, MoverMode, MoverRow, OrderBookSnapshot, OrderBookSummary, SlippageQuote,
    TickerSparkline,
};
use crate::slippage::calculate_slippage;
use crate::sparkline::{trend_direction, SparklineGenerator};
use crate::upstream::{select_symbols, TickerStats};

/// Deepest order book the exchange serves
pub const MAX_ORDERBOOK_DEPTH: usize = 250;

/// Levels shown by an order book summary unless asked otherwise
pub const DEFAULT_ORDERBOOK_DEPTH: usize = 20;

/// Longest movers list
pub const MAX_MOVERS_LIMIT: usize = 50;

/// Movers list length unless asked otherwise
pub const DEFAULT_MOVERS_LIMIT: usize = 10;

/// Market data service composing slippage quotes and ticker sparklines
///
/// Stateless apart from its settings, so one instance can be shared
/// between request handlers without locking.
#[derive(Debug, Clone)]
pub struct MarketDataService {
    /// Sparkline defaults
    sparkline: SparklineGenerator,
    /// Levels considered per book side
    max_depth: usize,
}

impl Default for MarketDataService {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketDataService {
    /// Create a new market data service with default settings
    pub fn new() -> Self {
        Self {
            sparkline: SparklineGenerator::default(),
            max_depth: MAX_ORDERBOOK_DEPTH,
        }
    }

    /// Create a service with custom settings
    pub fn with_settings(sparkline: SparklineGenerator, max_depth: usize) -> Self {
        Self {
            sparkline,
            max_depth: max_depth.clamp(1, MAX_ORDERBOOK_DEPTH),
        }
    }

    /// Sparkline generator in use
    pub fn sparkline(&self) -> &SparklineGenerator {
        &self.sparkline
    }

    /// Levels considered per book side
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Estimate a market order of `amount` base units on `side`
    pub fn quote_slippage(&self, book: &OrderBookSnapshot, side: Side, amount: Quantity) -> SlippageQuote {
        self.quote_slippage_with_depth(book, side, amount, self.max_depth)
    }

    /// Same as [`Self::quote_slippage`] with a per-request depth limit
    pub fn quote_slippage_with_depth(
        &self,
        book: &OrderBookSnapshot,
        side: Side,
        amount: Quantity,
        depth: usize,
    ) -> SlippageQuote {
        let depth = depth.min(self.max_depth);
        let book = book.truncated(depth);
        let result = calculate_slippage(book.side_for(side), amount);

        debug!(
            symbol = %book.symbol,
            %side,
            amount,
            depth,
            avg_price = result.avg_price,
            slippage_pct = result.slippage_pct,
            "Calculated slippage"
        );
        if !result.is_empty() && result.depth_used < amount {
            debug!(symbol = %book.symbol, filled = result.depth_used, amount, "Insufficient liquidity");
        }

        SlippageQuote {
            symbol: book.symbol.clone(),
            side,
            amount,
            avg_price: result.avg_price,
            best_price: result.best_price,
            slippage_pct: result.slippage_pct,
            spread: book.spread(),
            spread_pct: book.spread_pct(),
            depth_used: result.depth_used,
            total_cost: result.total_cost,
        }
    }

    /// Build a ticker row with its sparkline
    pub fn ticker_sparkline(&self, stats: &TickerStats) -> Result<TickerSparkline> {
        let pair: TradingPair = stats.symbol.parse()?;
        let prices = self.sparkline.generate_for_snapshot(&stats.snapshot());
        let points = self.sparkline.render_svg_points(&prices);

        Ok(TickerSparkline {
            symbol: stats.symbol.clone(),
            base: pair.base,
            quote: pair.quote,
            last_price: stats.last_price,
            change_pct_24h: stats.change_pct(),
            high_24h: stats.high_24h,
            low_24h: stats.low_24h,
            volume_24h: stats.quote_volume,
            highest_bid: stats.highest_bid,
            lowest_ask: stats.lowest_ask,
            trend: trend_direction(stats.change_pct()),
            prices,
            points,
        })
    }

    /// Ticker rows for the requested symbols, in upstream order
    ///
    /// Entries whose symbol is not a valid pair are logged and skipped.
    pub fn ticker_sparklines<S: AsRef<str>>(&self, stats: &[TickerStats], symbols: &[S]) -> Vec<TickerSparkline> {
        select_symbols(stats, symbols)
            .into_iter()
            .filter_map(|item| match self.ticker_sparkline(item) {
                Ok(row) => Some(row),
                Err(e) => {
                    warn!("Skipping ticker {}: {}", item.symbol, e);
                    None
                }
            })
            .collect()
    }

    /// Top `limit` markets by 24h change
    ///
    /// Markets without a change figure are left out. Gainers sort the largest
    /// change first, losers the smallest.
    pub fn movers(&self, stats: &[TickerStats], mode: MoverMode, limit: usize) -> Vec<MoverRow> {
        let mut ranked: Vec<(&TickerStats, f64)> = stats
            .iter()
            .filter_map(|item| item.change_pct_24h.map(|change| (item, change)))
            .collect();

        ranked.sort_by(|(_, a), (_, b)| match mode {
            MoverMode::Gainers => b.total_cmp(a),
            MoverMode::Losers => a.total_cmp(b),
        });
        ranked.truncate(limit.min(MAX_MOVERS_LIMIT));

        debug!(?mode, limit, returned = ranked.len(), "Ranked movers");

        ranked
            .into_iter()
            .map(|(item, change)| {
                let (base, quote) = match item.symbol.parse::<TradingPair>() {
                    Ok(pair) => (pair.base, pair.quote),
                    Err(_) => (item.symbol.clone(), String::new()),
                };
                MoverRow {
                    symbol: item.symbol.clone(),
                    base,
                    quote,
                    last_price: item.last_price,
                    change_pct_24h: change,
                    volume_24h: item.quote_volume,
                }
            })
            .collect()
    }

    /// Order book cut to `depth` levels per side, with its spread
    pub fn order_book_summary(&self, book: &OrderBookSnapshot, depth: usize) -> OrderBookSummary {
        let book = book.truncated(depth.min(self.max_depth));

        OrderBookSummary {
            spread: book.spread(),
            spread_pct: book.spread_pct(),
            bids: book.bids.iter().copied().map(BookLevel::from).collect(),
            asks: book.asks.iter().copied().map(BookLevel::from).collect(),
            symbol: book.symbol,
        }
    }
}
