//! Market data computations for price widgets
//!
//! Two pure components sit at the core: the order book slippage walk and the
//! synthetic sparkline generator. The service wraps them for request handling
//! and `upstream` maps the exchange's JSON shapes into their inputs.

mod models;
mod service;
pub mod slippage;
pub mod sparkline;
pub mod upstream;

pub use service::{
    MarketDataService, DEFAULT_MOVERS_LIMIT, DEFAULT_ORDERBOOK_DEPTH, MAX_MOVERS_LIMIT,
    MAX_ORDERBOOK_DEPTH,
};
pub use models::{
    PriceLevel, OrderBookSnapshot, SlippageResult, MarketSnapshot, SparkSeries,
    PlotPoints, ViewBox, TrendDirection, SlippageQuote, TickerSparkline,
    MoverMode, MoverRow, BookLevel, OrderBookSummary,
};
pub use slippage::calculate_slippage;
pub use sparkline::SparklineGenerator;
