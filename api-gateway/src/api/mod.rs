//! API handlers
//!
//! Each handler follows a consistent pattern:
//! - Extract state and the request body or query
//! - Validate input parameters
//! - Call the market data service
//! - Map the result to a standardized response format

pub mod orderbook;
pub mod response;
pub mod slippage;
pub mod ticker;

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

// Re-export the response module for easy access
pub use response::{ApiListResponse, ApiResponse, ResponseMetadata};

/// Service liveness
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
