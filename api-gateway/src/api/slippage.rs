//! Slippage API handler
//!
//! The caller posts the order book snapshot it fetched from the exchange
//! together with the order to estimate.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use common::error::Error;
use common::model::market::TradingPair;
use common::model::order::Side;
use market_data::upstream::{RawLevel, RawOrderBook};
use market_data::SlippageQuote;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::api::response::{ApiResponse, ResponseMetadata};
use crate::config::MAX_DEPTH;
use crate::error::ApiError;
use crate::AppState;

/// Smallest amount a quote may be requested for
pub const MIN_AMOUNT: f64 = 0.001;

/// Slippage request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct SlippageRequest {
    /// Trading pair, `BTC/USDT` or `BTC_USDT`
    pub symbol: String,
    /// Trade side: buy or sell
    #[serde(default = "default_side")]
    pub side: String,
    /// Trade amount in base currency
    pub amount: f64,
    /// Levels per side to consider
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

fn default_side() -> String {
    Side::Buy.to_string()
}

fn default_depth() -> usize {
    MAX_DEPTH
}

impl SlippageRequest {
    /// Check the parameters and return the parsed side
    fn validate(&self) -> Result<(TradingPair, Side), Error> {
        let pair: TradingPair = self.symbol.parse()?;
        let side: Side = self.side.parse()?;

        if !self.amount.is_finite() || self.amount < MIN_AMOUNT {
            return Err(Error::ValidationError(format!(
                "amount must be a number of at least {}, got {}",
                MIN_AMOUNT, self.amount
            )));
        }
        if !(1..=MAX_DEPTH).contains(&self.depth) {
            return Err(Error::ValidationError(format!(
                "depth must be between 1 and {}, got {}",
                MAX_DEPTH, self.depth
            )));
        }

        Ok((pair, side))
    }
}

/// Estimate slippage for a market order
#[utoipa::path(
    post,
    path = "/api/v1/slippage",
    request_body = SlippageRequest,
    responses(
        (status = 200, description = "Slippage estimated successfully", body = SlippageQuote),
        (status = 400, description = "Invalid request parameters")
    ),
    tag = "market"
)]
pub async fn quote_slippage(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SlippageRequest>, JsonRejection>,
) -> Result<ApiResponse<SlippageQuote>, ApiError> {
    let Json(request) = payload?;
    let (pair, side) = request.validate().map_err(ApiError::Common)?;

    let book = RawOrderBook {
        symbol: Some(pair.to_string()),
        bids: request.bids,
        asks: request.asks,
    }
    .into_snapshot(&request.symbol);

    let quote = state
        .market_data_service
        .quote_slippage_with_depth(&book, side, request.amount, request.depth);

    let meta = ResponseMetadata {
        request_id: None,
        extra: Some(serde_json::json!({ "depth": request.depth.min(state.market_data_service.max_depth()) })),
    };
    Ok(ApiResponse {
        data: quote,
        meta: Some(meta),
    })
}
