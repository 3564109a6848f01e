//! HTTP front for the market data computations
//!
//! Callers post the snapshots they fetched from the exchange and get back
//! slippage quotes, order book summaries, movers and ticker sparklines.

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use market_data::MarketDataService;
use utoipa::OpenApi;

use crate::config::AppConfig;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::health,
        api::slippage::quote_slippage,
        api::ticker::get_tickers,
        api::ticker::get_movers,
        api::ticker::get_trend,
        api::orderbook::get_order_book,
    ),
    components(
        schemas(
            api::HealthStatus,
            api::slippage::SlippageRequest,
            api::ticker::TickerRequest,
            api::ticker::TrendData,
            api::ticker::MoversRequest,
            api::orderbook::OrderBookRequest,
            market_data::MoverMode,
            market_data::MoverRow,
            market_data::BookLevel,
            market_data::OrderBookSummary,
            market_data::SlippageQuote,
            market_data::TickerSparkline,
            market_data::PlotPoints,
            market_data::TrendDirection,
            common::model::order::Side,
            api::response::ResponseMetadata,
        )
    ),
    tags(
        (name = "market", description = "Market data computations"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Market Kit API",
        version = "1.0.0",
        description = "Slippage estimates and sparklines computed from exchange snapshots"
    )
)]
pub struct ApiDoc;

/// App state shared across handlers
pub struct AppState {
    /// Market data service
    pub market_data_service: MarketDataService,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            market_data_service: config.market_data_service(),
            config,
        }
    }
}

/// Application routes without middleware
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/slippage", post(api::slippage::quote_slippage))
        .route("/ticker", post(api::ticker::get_tickers))
        .route("/movers", post(api::ticker::get_movers))
        .route("/orderbook", post(api::orderbook::get_order_book))
        .route("/trend", get(api::ticker::get_trend));

    Router::new()
        .route("/health", get(api::health))
        .nest("/api/v1", api_routes)
        .with_state(state)
}
