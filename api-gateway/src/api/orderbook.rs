//! Order book summary handler

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use common::error::Error;
use common::model::market::TradingPair;
use market_data::upstream::{RawLevel, RawOrderBook};
use market_data::{OrderBookSummary, DEFAULT_ORDERBOOK_DEPTH};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::response::ApiResponse;
use crate::config::MAX_DEPTH;
use crate::error::ApiError;
use crate::AppState;

/// Order book request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderBookRequest {
    /// Trading pair, `BTC_USDT` or `BTC/USDT`
    pub symbol: String,
    /// Levels per side to return
    #[serde(default = "default_depth")]
    pub depth: usize,
    /// Bid ladder, best first, as `[price, size]`
    #[serde(default)]
    #[schema(value_type = Vec<Vec<String>>)]
    pub bids: Vec<RawLevel>,
    /// Ask ladder, best first, as `[price, size]`
    #[serde(default)]
    #[schema(value_type = Vec<Vec<String>>)]
    pub asks: Vec<RawLevel>,
}

fn default_depth() -> usize {
    DEFAULT_ORDERBOOK_DEPTH
}

impl OrderBookRequest {
    fn validate(&self) -> Result<TradingPair, Error> {
        let pair: TradingPair = self.symbol.parse()?;
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(Error::ValidationError(format!(
                "depth must be between 1 and {}, got {}",
                MAX_DEPTH, self.depth
            )));
        }
        Ok(pair)
    }
}

/// Summarise an order book snapshot
#[utoipa::path(
    post,
    path = "/api/v1/orderbook",
    request_body = OrderBookRequest,
    responses(
        (status = 200, description = "Order book summarised", body = OrderBookSummary),
        (status = 400, description = "Invalid request parameters")
    ),
    tag = "market"
)]
pub async fn get_order_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderBookRequest>, JsonRejection>,
) -> Result<ApiResponse<OrderBookSummary>, ApiError> {
    let Json(request) = payload?;
    let pair = request.validate()?;

    // Widgets key order books by the exchange's underscore symbol
    let book = RawOrderBook {
        symbol: Some(pair.underscore()),
        bids: request.bids,
        asks: request.asks,
    }
    .into_snapshot(&request.symbol);

    let summary = state
        .market_data_service
        .order_book_summary(&book, request.depth);
    Ok(ApiResponse::new(summary))
}
