//! Standardized API response formats
//!
//! Every endpoint wraps its payload in one of these so clients always find
//! the result under `data`.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use utoipa::ToSchema;

/// A standardized API response wrapper for single resource responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// The response data
    pub data: T,
    /// Optional metadata about the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,
}

/// Additional metadata about the response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResponseMetadata {
    /// Optional request ID for tracking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Optional additional metadata fields
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

/// A standardized API response wrapper for list/collection responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiListResponse<T> {
    /// The list of items
    pub data: Vec<T>,
    /// Optional metadata about the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMetadata>,
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> IntoResponse for ApiListResponse<T>
where
    T: Serialize + Debug,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

impl<T> ApiResponse<T> {
    /// Create a new API response with just data
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }
}

impl<T> ApiListResponse<T> {
    /// Create a new list response with data and metadata
    pub fn with_metadata(data: Vec<T>, meta: ResponseMetadata) -> Self {
        Self {
            data,
            meta: Some(meta),
        }
    }
}
