//! Ticker and trend API handlers

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use common::error::Error;
use market_data::sparkline::trend_direction;
use market_data::upstream::{parse_symbol_list, TickerStats};
use market_data::{
    MoverMode, MoverRow, TickerSparkline, TrendDirection, DEFAULT_MOVERS_LIMIT, MAX_MOVERS_LIMIT,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::response::{ApiListResponse, ApiResponse, ResponseMetadata};
use crate::error::ApiError;
use crate::AppState;

/// Ticker request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct TickerRequest {
    /// Comma-separated trading pairs in slash form
    #[serde(default = "default_symbols")]
    pub symbols: String,
    /// Raw 24h statistics list from the exchange
    #[schema(value_type = Vec<Object>)]
    pub stats: Vec<TickerStats>,
}

fn default_symbols() -> String {
    "BTC/USDT,ETH/USDT".to_string()
}

/// Build ticker rows with sparklines
#[utoipa::path(
    post,
    path = "/api/v1/ticker",
    request_body = TickerRequest,
    responses(
        (status = 200, description = "Ticker rows built successfully", body = [TickerSparkline]),
        (status = 400, description = "Invalid request body")
    ),
    tag = "market"
)]
pub async fn get_tickers(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TickerRequest>, JsonRejection>,
) -> Result<ApiListResponse<TickerSparkline>, ApiError> {
    let Json(request) = payload?;
    let symbols = parse_symbol_list(&request.symbols);
    let rows = state
        .market_data_service
        .ticker_sparklines(&request.stats, &symbols);

    let meta = ResponseMetadata {
        request_id: None,
        extra: Some(serde_json::json!({ "requested": symbols.len() })),
    };
    Ok(ApiListResponse::with_metadata(rows, meta))
}

/// Movers request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoversRequest {
    /// Sort mode: gainers or losers
    #[serde(default)]
    pub mode: MoverMode,
    /// Number of rows to return
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Raw 24h statistics list from the exchange
    #[schema(value_type = Vec<Object>)]
    pub stats: Vec<TickerStats>,
}

fn default_limit() -> usize {
    DEFAULT_MOVERS_LIMIT
}

/// Rank markets by 24h change
#[utoipa::path(
    post,
    path = "/api/v1/movers",
    request_body = MoversRequest,
    responses(
        (status = 200, description = "Movers ranked", body = [MoverRow]),
        (status = 400, description = "Invalid request parameters")
    ),
    tag = "market"
)]
pub async fn get_movers(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MoversRequest>, JsonRejection>,
) -> Result<ApiListResponse<MoverRow>, ApiError> {
    let Json(request) = payload?;
    if !(1..=MAX_MOVERS_LIMIT).contains(&request.limit) {
        return Err(Error::ValidationError(format!(
            "limit must be between 1 and {}, got {}",
            MAX_MOVERS_LIMIT, request.limit
        ))
        .into());
    }

    let rows = state
        .market_data_service
        .movers(&request.stats, request.mode, request.limit);

    let meta = ResponseMetadata {
        request_id: None,
        extra: Some(serde_json::json!({ "mode": request.mode })),
    };
    Ok(ApiListResponse::with_metadata(rows, meta))
}

/// Trend query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrendQuery {
    /// 24h percent change
    pub change_pct_24h: f64,
}

/// Trend classification
#[derive(Debug, Serialize, ToSchema)]
pub struct TrendData {
    pub change_pct_24h: f64,
    pub trend: TrendDirection,
}

/// Classify a 24h change as positive or negative
#[utoipa::path(
    get,
    path = "/api/v1/trend",
    params(TrendQuery),
    responses(
        (status = 200, description = "Trend classified", body = TrendData),
        (status = 400, description = "Missing or invalid change")
    ),
    tag = "market"
)]
pub async fn get_trend(
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> Result<ApiResponse<TrendData>, ApiError> {
    let Query(query) = query?;
    Ok(ApiResponse::new(TrendData {
        change_pct_24h: query.change_pct_24h,
        trend: trend_direction(query.change_pct_24h),
    }))
}
