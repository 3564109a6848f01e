//! Error handling for the API gateway

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Common error: {0}")]
    Common(#[from] common::error::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// Status code and error code for this error
    fn classify(&self) -> (StatusCode, &'static str) {
        use common::error::Error;

        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                Error::InvalidSymbol(_) => (StatusCode::BAD_REQUEST, "invalid_symbol"),
                Error::InvalidSide(_) => (StatusCode::BAD_REQUEST, "invalid_side"),
                Error::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                Error::UpstreamFormat(_) => (StatusCode::BAD_GATEWAY, "upstream_format"),

                // Server errors (5xx)
                Error::ConfigurationError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error"),
                Error::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error"),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();
        let (status, code) = self.classify();

        if status.is_server_error() {
            tracing::error!("API Error [{}]: {:?}", request_id, &self);
        } else {
            tracing::warn!("API Error [{}]: {}", request_id, &self);
        }

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}
