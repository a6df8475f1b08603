//! API response helpers.
//!
//! Success bodies are returned as-is; failures render an `ErrorResponse`
//! with the status code of the underlying `PricingError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use priceopt_core::{ErrorResponse, FieldError, PricingError};
use serde::Serialize;
use tracing::error;

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub PricingError);

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(Json(data))
}

/// Helper to create a no content (204) response.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Builds an error response with an explicit status, code and field details.
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
    details: Option<Vec<FieldError>>,
) -> Response {
    let body = ErrorResponse {
        code: code.to_string(),
        message: message.into(),
        details,
        trace_id: None,
    };
    (status, Json(body)).into_response()
}
